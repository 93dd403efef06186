//! Deterministic tick scheduler
//!
//! Drives ticks by hand instead of off a clock. Used by the test suite
//! and by any embedder that wants to own the cadence (a UI event loop,
//! for instance).

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use super::{OnceFn, TickFn, TickHandle, TickScheduler};

#[derive(Default)]
struct ManualInner {
    next_id: u64,
    repeating: HashMap<u64, TickFn>,
    delayed: Vec<(u64, Duration, OnceFn)>,
    /// Registrations cancelled while their callback was mid-flight.
    cancelled: HashSet<u64>,
}

/// Scheduler whose time only advances when the caller says so.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualInner> {
        self.inner.lock().expect("manual scheduler lock")
    }

    /// Fire every live repeating registration once.
    ///
    /// Callbacks run without the scheduler lock held, so they may cancel
    /// their own handle or register new work.
    pub fn fire(&self) {
        let ids: Vec<u64> = self.lock().repeating.keys().copied().collect();
        for id in ids {
            let Some(mut tick) = self.lock().repeating.remove(&id) else {
                continue;
            };
            tick();
            let mut inner = self.lock();
            if !inner.cancelled.remove(&id) {
                inner.repeating.insert(id, tick);
            }
        }
    }

    /// Fire all repeating registrations `n` times.
    pub fn fire_n(&self, n: usize) {
        for _ in 0..n {
            self.fire();
        }
    }

    /// Run every pending delayed job, returning how many ran.
    pub fn run_delayed(&self) -> usize {
        let jobs = std::mem::take(&mut self.lock().delayed);
        let mut ran = 0;
        for (id, _, job) in jobs {
            if self.lock().cancelled.remove(&id) {
                continue;
            }
            job();
            ran += 1;
        }
        ran
    }

    /// Number of live repeating registrations.
    pub fn live_repeating(&self) -> usize {
        self.lock().repeating.len()
    }

    /// Number of delayed jobs not yet run.
    pub fn pending_delayed(&self) -> usize {
        self.lock().delayed.len()
    }

    /// Delay of the most recently registered one-shot job.
    pub fn last_delay(&self) -> Option<Duration> {
        self.lock().delayed.last().map(|(_, delay, _)| *delay)
    }

    fn cancel_id(inner: &Arc<Mutex<ManualInner>>, id: u64) {
        let mut guard = inner.lock().expect("manual scheduler lock");
        let removed = guard.repeating.remove(&id).is_some() || {
            let before = guard.delayed.len();
            guard.delayed.retain(|(job_id, _, _)| *job_id != id);
            guard.delayed.len() != before
        };
        if !removed {
            // Mid-flight: the callback is running right now. Remember the
            // cancellation so fire()/run_delayed() drop it afterwards.
            guard.cancelled.insert(id);
        }
    }

    fn register(&self) -> (u64, Arc<Mutex<ManualInner>>) {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        (id, Arc::clone(&self.inner))
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_repeating(&self, _period: Duration, tick: TickFn) -> TickHandle {
        let (id, inner) = self.register();
        self.lock().repeating.insert(id, tick);
        TickHandle::new(move || Self::cancel_id(&inner, id))
    }

    fn schedule_once(&self, delay: Duration, job: OnceFn) -> TickHandle {
        let (id, inner) = self.register();
        self.lock().delayed.push((id, delay, job));
        TickHandle::new(move || Self::cancel_id(&inner, id))
    }
}
