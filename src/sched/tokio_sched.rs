//! Tokio-backed tick scheduler

use std::time::Duration;

use tokio::time::{interval, sleep, MissedTickBehavior};

use super::{OnceFn, TickFn, TickHandle, TickScheduler};

/// Scheduler driving ticks off the tokio runtime.
///
/// Must be used from within a runtime; registrations are spawned tasks
/// and cancellation aborts them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TickScheduler for TokioScheduler {
    fn schedule_repeating(&self, period: Duration, mut tick: TickFn) -> TickHandle {
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; consume it so
            // the callback fires one full period after registration.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                tick();
            }
        });
        TickHandle::new(move || task.abort())
    }

    fn schedule_once(&self, delay: Duration, job: OnceFn) -> TickHandle {
        let task = tokio::spawn(async move {
            sleep(delay).await;
            job();
        });
        TickHandle::new(move || task.abort())
    }
}
