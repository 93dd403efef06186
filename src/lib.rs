//! Focus Timer - a pomodoro-style countdown bound to a to-do item
//!
//! This library provides the focus timer state machine: start, tick,
//! pause, reset and stop transitions, percentage-based progress, a
//! navigation guard, and completion side effects (persist the item,
//! alert the user). External collaborators plug in through traits:
//! [`ItemStore`], [`TickScheduler`], [`Notifier`], [`ConfirmPrompt`] and
//! [`Navigator`].

pub mod config;
pub mod guard;
pub mod notify;
pub mod sched;
pub mod state;
pub mod store;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, PersistFailurePolicy, TimerConfig};
pub use guard::{ConfirmPrompt, Navigator};
pub use notify::{LogNotifier, Notifier};
pub use sched::{ManualScheduler, TickHandle, TickScheduler, TokioScheduler};
pub use state::{TimedItem, TimerSession};
pub use store::{ItemStore, JsonFileStore, MemoryStore, StoreError};
pub use timer::FocusTimer;
pub use utils::shutdown_signal;
