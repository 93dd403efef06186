//! In-memory item store

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use tracing::debug;

use super::{ItemStore, StoreError};
use crate::state::TimedItem;

/// In-process item store backed by a HashMap.
///
/// Counts persist calls so callers (and tests) can observe the
/// exactly-once persistence contract of the timer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, TimedItem>>,
    persists: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with items
    pub fn with_items(items: impl IntoIterator<Item = TimedItem>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Self {
            items: Mutex::new(items),
            persists: AtomicU64::new(0),
        }
    }

    /// Number of persist calls made against this store
    pub fn persist_count(&self) -> u64 {
        self.persists.load(Ordering::SeqCst)
    }
}

impl ItemStore for MemoryStore {
    fn fetch(&self, id: &str) -> Result<TimedItem, StoreError> {
        let items = self
            .items
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        items
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn persist(&self, item: &TimedItem) -> Result<(), StoreError> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        debug!("Persisting item {} (complete={})", item.id, item.complete);
        items.insert(item.id.clone(), item.clone());
        self.persists.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
