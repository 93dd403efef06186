//! State structures for the focus timer
//!
//! This module contains the plain-data types the timer operates on: the
//! to-do item being focused on and the ephemeral countdown session.

pub mod item;
pub mod session;

// Re-export main types
pub use item::TimedItem;
pub use session::TimerSession;
