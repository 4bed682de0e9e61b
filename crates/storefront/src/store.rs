//! Cart persistence.
//!
//! The cart lives as a single JSON array document under a constant key
//! name. Storage failures never surface to callers: an absent, unreadable,
//! or malformed document loads as an empty cart, and a failed save is
//! logged and dropped. Every cart operation performs a full
//! read-mutate-write cycle, so nothing above this layer handles errors.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use cartside_core::LineItem;
use thiserror::Error;

/// Key name of the persisted cart document.
pub const CART_KEY: &str = "cart";

/// Errors internal to the storage layer. Swallowed (and logged) at the
/// trait surface.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed cart document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persistent key-value storage for the cart, injected into the cart
/// service.
pub trait CartStore: Send + Sync {
    /// Load the stored cart. Returns an empty cart when the backing
    /// document is absent, unreadable, or malformed.
    fn load(&self) -> Vec<LineItem>;

    /// Serialize and overwrite the stored cart unconditionally.
    fn save(&self, items: &[LineItem]);
}

/// File-backed store: one JSON array at `{data_dir}/cart.json`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{CART_KEY}.json")),
        }
    }

    fn try_load(&self) -> Result<Vec<LineItem>, StoreError> {
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn try_save(&self, items: &[LineItem]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(items)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Vec<LineItem> {
        if !self.path.exists() {
            return Vec::new();
        }
        match self.try_load() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Failed to load cart from {:?}: {e}", self.path);
                Vec::new()
            }
        }
    }

    fn save(&self, items: &[LineItem]) {
        if let Err(e) = self.try_save(items) {
            tracing::error!("Failed to save cart to {:?}: {e}", self.path);
        }
    }
}

/// In-memory store, used as a test double for the cart service.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<LineItem>>,
}

impl CartStore for MemoryStore {
    fn load(&self) -> Vec<LineItem> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, items: &[LineItem]) {
        *self.items.lock().unwrap_or_else(PoisonError::into_inner) = items.to_vec();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_returns_empty_when_document_absent() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        let items = vec![LineItem::new("a", "Item A", 2.5)];
        store.save(&items);
        assert_eq!(store.load(), items);
    }

    #[test]
    fn malformed_document_loads_as_empty_cart() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("cart.json"), "{not json").unwrap();

        let store = JsonFileStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_creates_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("data");
        let store = JsonFileStore::new(&nested);

        store.save(&[LineItem::new("a", "Item A", 1.0)]);
        assert_eq!(store.load().len(), 1);
    }
}
