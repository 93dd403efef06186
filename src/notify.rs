//! Completion notification seam

use tracing::info;

use crate::state::TimedItem;

/// User-facing alert shown after a countdown completes.
///
/// The timer schedules this one second after the session has fully
/// reset, so the view settles before the dialog appears.
pub trait Notifier: Send + Sync {
    fn completion_alert(&self, item: &TimedItem);
}

/// Default notifier that announces completion through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn completion_alert(&self, item: &TimedItem) {
        info!("🚨 It is cool 😎 \"{}\" is done. I wish you could share it!", item.title);
    }
}
