//! Countdown session state

/// Ephemeral state of one countdown session.
///
/// Never persisted; the timer publishes clones of this on a watch channel
/// so a view layer can render the remaining time and progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSession {
    /// Seconds left in the countdown.
    pub remaining_seconds: u64,
    /// Countdown length fixed at session start (configured minutes * 60 + 1).
    pub total_seconds: u64,
    /// Progress percentage in [0, 100], recomputed from the two
    /// second-counts on every tick.
    pub progress: f64,
    /// The timer is currently ticking.
    pub is_active: bool,
    /// The session has been started at least once since the last reset.
    pub has_started: bool,
}

impl TimerSession {
    /// Create a fresh idle session.
    ///
    /// An unstarted session displays a full bar, matching the reset state.
    pub fn new() -> Self {
        Self {
            remaining_seconds: 0,
            total_seconds: 0,
            progress: 100.0,
            is_active: false,
            has_started: false,
        }
    }

    /// Progress percentage spent so far, as a pure function of the two
    /// second-counts.
    pub fn progress_for(total_seconds: u64, remaining_seconds: u64) -> f64 {
        if total_seconds == 0 {
            return 100.0;
        }
        ((total_seconds - remaining_seconds) as f64 / total_seconds as f64) * 100.0
    }

    /// Recompute `progress` from the current second-counts.
    pub fn recompute_progress(&mut self) {
        self.progress = Self::progress_for(self.total_seconds, self.remaining_seconds);
    }

    /// Remaining time as a zero-padded "MM:SS" string.
    pub fn display(&self) -> String {
        let minutes = self.remaining_seconds / 60;
        let seconds = self.remaining_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Return to the idle state: no time left, full bar shown.
    ///
    /// The full-bar-on-reset display is a deliberate quirk of the design
    /// and is relied upon by the view layer.
    pub fn reset_to_idle(&mut self) {
        self.remaining_seconds = 0;
        self.progress = 100.0;
        self.is_active = false;
        self.has_started = false;
    }

    /// An idle session: nothing running, nothing to resume.
    pub fn is_idle(&self) -> bool {
        !self.is_active && !self.has_started
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new()
    }
}
