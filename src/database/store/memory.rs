//! In-process record store.
//!
//! Used for development and tests. Clones share the same storage, and a
//! store can be switched into a failing mode to simulate an outage.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::RwLock;

use super::{RecordStore, StoreError};
use crate::database::models::{Category, Record};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<(String, Category), Record>>,
    failure: Arc<RwLock<Option<String>>>,
    loads: Arc<AtomicU64>,
    saves: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `StoreError::Service(message)`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    /// Leave failing mode.
    pub fn recover(&self) {
        *self.failure.write() = None;
    }

    /// Number of `load` calls seen, including failed ones.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of `save` calls seen, including failed ones.
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }

    /// Read a stored record without going through the counters.
    pub fn peek(&self, owner_id: &str, category: Category) -> Option<Record> {
        self.records
            .get(&(owner_id.to_string(), category))
            .map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.failure.read().as_ref() {
            Some(message) => Err(StoreError::Service(message.clone())),
            None => Ok(()),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, owner_id: &str, category: Category) -> Result<Record, StoreError> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        self.check()?;

        self.peek(owner_id, category)
            .ok_or_else(|| StoreError::not_found(owner_id, category))
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        self.check()?;

        self.records
            .insert((record.owner_id.clone(), record.category), record.clone());
        Ok(())
    }

    fn delete(&self, owner_id: &str, category: Category) -> Result<(), StoreError> {
        self.check()?;

        self.records.remove(&(owner_id.to_string(), category));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.load("alice", Category::INBOX).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let record = Record::new("alice", Category::INBOX).with("k", "v");

        store.save(&record).unwrap();
        assert_eq!(store.load("alice", Category::INBOX).unwrap(), record);
        assert_eq!(store.len(), 1);

        store.delete("alice", Category::INBOX).unwrap();
        store.delete("alice", Category::INBOX).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_failure_mode() {
        let store = MemoryStore::new();
        store.fail_with("disk error");

        let err = store.save(&Record::new("a", Category::INBOX)).unwrap_err();
        assert_eq!(err.to_string(), "disk error");
        assert!(store.is_empty());

        store.recover();
        assert!(store.save(&Record::new("a", Category::INBOX)).is_ok());
    }
}
