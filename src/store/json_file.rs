//! JSON-file item store

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::{debug, info};

use super::{ItemStore, StoreError};
use crate::state::TimedItem;

/// Item store persisted to a JSON file.
///
/// The whole item list is loaded at open and rewritten on every persist.
/// Good enough for a to-do list; this is not a storage engine.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: Mutex<HashMap<String, TimedItem>>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating an empty one if the file is missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let items = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let list: Vec<TimedItem> = serde_json::from_str(&raw)?;
            info!("Loaded {} items from {}", list.len(), path.display());
            list.into_iter().map(|item| (item.id.clone(), item)).collect()
        } else {
            debug!("No item file at {}, starting empty", path.display());
            HashMap::new()
        };
        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    fn flush(&self, items: &HashMap<String, TimedItem>) -> Result<(), StoreError> {
        let mut list: Vec<&TimedItem> = items.values().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        let raw = serde_json::to_string_pretty(&list)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl ItemStore for JsonFileStore {
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
        items.insert(item.id.clone(), item.clone());
        debug!("Persisting item {} to {}", item.id, self.path.display());
        self.flush(&items)
    }
}
