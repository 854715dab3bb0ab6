//! Store composed of two stores.
//!
//! Reads go to the left store and, if configured, fall back to the right
//! one on a miss. Records found only on the right can be copied to the left
//! as they are read, which migrates a dataset lazily from one backend to
//! another (e.g. files to MongoDB).

use tracing::{debug, warn};

use super::{RecordStore, StoreError};
use crate::database::models::{Category, Record};

/// Which side(s) a save goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Left,
    Right,
    /// Left first; the right store is only written if the left succeeded.
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualStoreConfig {
    /// Read the right store when the left one has no record.
    pub read_fallback: bool,

    /// Copy records found only on the right into the left store.
    pub migrate_on_read: bool,

    pub write: WriteMode,
}

impl Default for DualStoreConfig {
    fn default() -> Self {
        Self {
            read_fallback: true,
            migrate_on_read: false,
            write: WriteMode::Left,
        }
    }
}

impl DualStoreConfig {
    /// Lazy migration from right to left: read both, write left only.
    pub fn migration() -> Self {
        Self {
            read_fallback: true,
            migrate_on_read: true,
            write: WriteMode::Left,
        }
    }

    /// Keep both stores in step: read left with fallback, write both.
    pub fn mirror() -> Self {
        Self {
            read_fallback: true,
            migrate_on_read: false,
            write: WriteMode::Both,
        }
    }

    #[must_use]
    pub fn read_fallback(mut self, enabled: bool) -> Self {
        self.read_fallback = enabled;
        self
    }

    #[must_use]
    pub fn migrate_on_read(mut self, enabled: bool) -> Self {
        self.migrate_on_read = enabled;
        self
    }

    #[must_use]
    pub fn write(mut self, mode: WriteMode) -> Self {
        self.write = mode;
        self
    }
}

pub struct DualStore<L, R> {
    left: L,
    right: R,
    config: DualStoreConfig,
}

impl<L: RecordStore, R: RecordStore> DualStore<L, R> {
    pub fn new(left: L, right: R, config: DualStoreConfig) -> Self {
        Self { left, right, config }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }

    pub fn config(&self) -> &DualStoreConfig {
        &self.config
    }
}

impl<L: RecordStore, R: RecordStore> RecordStore for DualStore<L, R> {
    fn load(&self, owner_id: &str, category: Category) -> Result<Record, StoreError> {
        match self.left.load(owner_id, category) {
            Err(StoreError::NotFound { .. }) if self.config.read_fallback => {}
            other => return other,
        }

        let record = self.right.load(owner_id, category)?;
        debug!("Record {}/{} served from fallback store", owner_id, category);

        if self.config.migrate_on_read {
            // The right copy is still authoritative if this fails; try again next read.
            match self.left.save(&record) {
                Ok(()) => debug!("Migrated record {}/{}", owner_id, category),
                Err(e) => warn!("Failed to migrate record {}/{}: {}", owner_id, category, e),
            }
        }

        Ok(record)
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        match self.config.write {
            WriteMode::Left => self.left.save(record),
            WriteMode::Right => self.right.save(record),
            WriteMode::Both => {
                self.left.save(record)?;
                self.right.save(record)
            }
        }
    }

    /// Deletes from both sides so a fallback read can't bring the record back.
    fn delete(&self, owner_id: &str, category: Category) -> Result<(), StoreError> {
        self.left.delete(owner_id, category)?;
        self.right.delete(owner_id, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::MemoryStore;

    fn stores() -> (MemoryStore, MemoryStore) {
        (MemoryStore::new(), MemoryStore::new())
    }

    /// Readable store whose writes always fail.
    struct ReadOnly(MemoryStore);

    impl RecordStore for ReadOnly {
        fn load(&self, owner_id: &str, category: Category) -> Result<Record, StoreError> {
            self.0.load(owner_id, category)
        }

        fn save(&self, _: &Record) -> Result<(), StoreError> {
            Err(StoreError::Service("read only".to_string()))
        }

        fn delete(&self, owner_id: &str, category: Category) -> Result<(), StoreError> {
            self.0.delete(owner_id, category)
        }
    }

    #[test]
    fn test_left_hit_skips_right() {
        let (left, right) = stores();
        left.save(&Record::new("alice", Category::INBOX).with("side", "left")).unwrap();
        right.save(&Record::new("alice", Category::INBOX).with("side", "right")).unwrap();
        let dual = DualStore::new(left, right, DualStoreConfig::default());

        let record = dual.load("alice", Category::INBOX).unwrap();
        assert_eq!(record.get_str("side"), Some("left"));
        assert_eq!(dual.right().load_count(), 0);
    }

    #[test]
    fn test_fallback_to_right() {
        let (left, right) = stores();
        right.save(&Record::new("alice", Category::INBOX).with("side", "right")).unwrap();
        let dual = DualStore::new(left, right, DualStoreConfig::default());

        let record = dual.load("alice", Category::INBOX).unwrap();
        assert_eq!(record.get_str("side"), Some("right"));
        // No migration by default.
        assert!(dual.left().is_empty());
    }

    #[test]
    fn test_fallback_disabled() {
        let (left, right) = stores();
        right.save(&Record::new("alice", Category::INBOX)).unwrap();
        let dual = DualStore::new(left, right, DualStoreConfig::default().read_fallback(false));

        assert!(dual.load("alice", Category::INBOX).unwrap_err().is_not_found());
        assert_eq!(dual.right().load_count(), 0);
    }

    #[test]
    fn test_missing_on_both_sides() {
        let (left, right) = stores();
        let dual = DualStore::new(left, right, DualStoreConfig::migration());

        assert!(dual.load("nobody", Category::INBOX).unwrap_err().is_not_found());
        assert!(dual.left().is_empty());
    }

    #[test]
    fn test_migrate_on_read() {
        let (left, right) = stores();
        let record = Record::new("alice", Category::INBOX).with("v", 1);
        right.save(&record).unwrap();
        let dual = DualStore::new(left, right, DualStoreConfig::migration());

        assert_eq!(dual.load("alice", Category::INBOX).unwrap(), record);
        assert_eq!(dual.left().peek("alice", Category::INBOX), Some(record.clone()));

        // Second read is served by the left store.
        assert_eq!(dual.load("alice", Category::INBOX).unwrap(), record);
        assert_eq!(dual.right().load_count(), 1);
    }

    #[test]
    fn test_failed_migration_still_returns_record() {
        let right = MemoryStore::new();
        right.save(&Record::new("alice", Category::INBOX).with("v", 1)).unwrap();
        let dual = DualStore::new(ReadOnly(MemoryStore::new()), right, DualStoreConfig::migration());

        assert_eq!(dual.load("alice", Category::INBOX).unwrap().get_i64("v"), Some(1));
        assert!(dual.left().0.is_empty());
    }

    #[test]
    fn test_left_failure_is_not_masked() {
        let (left, right) = stores();
        right.save(&Record::new("alice", Category::INBOX)).unwrap();
        left.fail_with("disk error");
        let dual = DualStore::new(left, right, DualStoreConfig::migration());

        let err = dual.load("alice", Category::INBOX).unwrap_err();
        assert_eq!(err.to_string(), "disk error");
        assert_eq!(dual.right().load_count(), 0);
    }

    #[test]
    fn test_write_modes() {
        let record = Record::new("alice", Category::INBOX).with("v", 1);

        let (left, right) = stores();
        let dual = DualStore::new(left, right, DualStoreConfig::default().write(WriteMode::Left));
        dual.save(&record).unwrap();
        assert_eq!((dual.left().len(), dual.right().len()), (1, 0));

        let (left, right) = stores();
        let dual = DualStore::new(left, right, DualStoreConfig::default().write(WriteMode::Right));
        dual.save(&record).unwrap();
        assert_eq!((dual.left().len(), dual.right().len()), (0, 1));

        let (left, right) = stores();
        let dual = DualStore::new(left, right, DualStoreConfig::mirror());
        dual.save(&record).unwrap();
        assert_eq!((dual.left().len(), dual.right().len()), (1, 1));
    }

    #[test]
    fn test_mirror_stops_after_left_failure() {
        let (left, right) = stores();
        left.fail_with("offline");
        let dual = DualStore::new(left, right, DualStoreConfig::mirror());

        assert!(dual.save(&Record::new("alice", Category::INBOX)).is_err());
        assert_eq!(dual.right().save_count(), 0);
    }

    #[test]
    fn test_delete_removes_both_sides() {
        let (left, right) = stores();
        left.save(&Record::new("alice", Category::INBOX)).unwrap();
        right.save(&Record::new("alice", Category::INBOX)).unwrap();
        let dual = DualStore::new(left, right, DualStoreConfig::default());

        dual.delete("alice", Category::INBOX).unwrap();
        assert!(dual.load("alice", Category::INBOX).unwrap_err().is_not_found());
    }
}
