//! Persistence boundary for the entity store.
//!
//! Each named collection round-trips as a single JSON blob; backends stay
//! ignorant of the domain types they carry.

pub mod json_backend;
pub mod paths;

use std::{
    collections::HashMap,
    sync::Mutex,
};

use crate::errors::Result;

pub use json_backend::JsonStorage;

/// The named collections the store persists.
pub mod collections {
    pub const ACCOUNTS: &str = "accounts";
    pub const CATEGORIES: &str = "categories";
    pub const TRANSACTIONS: &str = "transactions";
    pub const BUDGETS: &str = "budgets";
}

/// Key-value blob store, one entry per named collection.
///
/// `load` returns `None` for a collection that has never been saved; the
/// store treats that as "use built-in defaults".
pub trait StorageBackend {
    fn load(&self, collection: &str) -> Result<Option<String>>;
    fn save(&self, collection: &str, payload: &str) -> Result<()>;
}

/// Volatile backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, collection: &str) -> Result<Option<String>> {
        let blobs = self.blobs.lock().expect("storage mutex poisoned");
        Ok(blobs.get(collection).cloned())
    }

    fn save(&self, collection: &str, payload: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().expect("storage mutex poisoned");
        blobs.insert(collection.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_roundtrips_blobs() {
        let storage = MemoryStorage::new();
        assert!(storage.load(collections::ACCOUNTS).unwrap().is_none());
        storage.save(collections::ACCOUNTS, "[]").unwrap();
        assert_eq!(
            storage.load(collections::ACCOUNTS).unwrap().as_deref(),
            Some("[]")
        );
    }
}
