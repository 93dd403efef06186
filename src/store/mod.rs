//! Item store collaborators
//!
//! The timer never owns item data. It fetches the item to focus on at
//! activation and persists the completion flag back through an
//! [`ItemStore`] implementation.

pub mod json_file;
pub mod memory;

use thiserror::Error;

use crate::state::TimedItem;

// Re-export main types
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors surfaced by item store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("store lock poisoned: {0}")]
    Lock(String),
}

/// External collaborator owning item data and persistence.
///
/// `persist` is an upsert: the stored copy of the item is replaced
/// wholesale. The timer calls it exactly once per completed session.
pub trait ItemStore: Send + Sync {
    /// Fetch the item to run a session against.
    fn fetch(&self, id: &str) -> Result<TimedItem, StoreError>;

    /// Write the item back, replacing any stored copy.
    fn persist(&self, item: &TimedItem) -> Result<(), StoreError>;
}
