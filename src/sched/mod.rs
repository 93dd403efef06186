//! Tick scheduling
//!
//! The timer never talks to the clock directly. It asks a
//! [`TickScheduler`] for a repeating 1-second callback (the countdown
//! tick) and a delayed one-shot (the completion alert), and holds the
//! returned [`TickHandle`] so the registration can be cancelled. The
//! state machine keeps at most one live repeating handle at a time.

pub mod manual;
pub mod tokio_sched;

use std::fmt;
use std::time::Duration;

// Re-export main types
pub use manual::ManualScheduler;
pub use tokio_sched::TokioScheduler;

/// Repeating callback invoked once per period.
pub type TickFn = Box<dyn FnMut() + Send>;

/// One-shot callback invoked after a delay.
pub type OnceFn = Box<dyn FnOnce() + Send>;

/// Cancels its registration when consumed.
///
/// Dropping a handle without calling [`cancel`](TickHandle::cancel)
/// leaves the registration live; the owner is responsible for cancelling
/// on pause, reset, completion and teardown.
pub struct TickHandle {
    cancel: Box<dyn FnOnce() + Send>,
}

impl TickHandle {
    /// Wrap a cancellation action provided by a scheduler.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Box::new(cancel),
        }
    }

    /// Cancel the registration this handle stands for.
    pub fn cancel(self) {
        (self.cancel)()
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TickHandle")
    }
}

/// Host scheduling capability injected into the timer.
pub trait TickScheduler: Send + Sync {
    /// Invoke `tick` every `period` of wall-clock time until cancelled.
    /// The first invocation happens one full period after registration.
    fn schedule_repeating(&self, period: Duration, tick: TickFn) -> TickHandle;

    /// Invoke `job` once after `delay`.
    fn schedule_once(&self, delay: Duration, job: OnceFn) -> TickHandle;
}
