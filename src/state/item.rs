//! To-do item structure shared with the item store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A to-do item a focus session can be run against.
///
/// Owned by the item store; the timer holds a transient copy for the
/// duration of one session and writes the completion flag back through
/// the store when the countdown finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedItem {
    pub id: String,
    pub title: String,
    pub complete: bool,
    /// Set once, when the countdown that completed this item elapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TimedItem {
    /// Create a new incomplete item
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            complete: false,
            completed_at: None,
        }
    }

    /// Mark the item complete, recording the completion time.
    ///
    /// Idempotent: an already-complete item keeps its original timestamp.
    pub fn mark_complete(&mut self) {
        if !self.complete {
            self.complete = true;
            self.completed_at = Some(Utc::now());
        }
    }
}
