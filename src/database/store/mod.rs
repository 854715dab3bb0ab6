//! Durable record stores.
//!
//! A store persists one record per (owner id, category) and reports a
//! missing record as [`StoreError::NotFound`], separate from real failures.

mod dual;
mod fs;
mod memory;
mod mongo;

use thiserror::Error;

use crate::database::models::{Category, Record};

pub use dual::{DualStore, DualStoreConfig, WriteMode};
pub use fs::FsStore;
pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record for owner '{owner_id}' in category {category}")]
    NotFound { owner_id: String, category: Category },

    /// Generic backend failure carrying only a message.
    #[error("{0}")]
    Service(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

impl StoreError {
    pub fn not_found(owner_id: &str, category: Category) -> Self {
        Self::NotFound {
            owner_id: owner_id.to_string(),
            category,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Durable load/save/delete keyed by (owner id, category).
pub trait RecordStore: Send + Sync {
    /// Load a record, or `StoreError::NotFound` if none was ever saved.
    fn load(&self, owner_id: &str, category: Category) -> Result<Record, StoreError>;

    /// Persist a record, replacing any previous one with the same identity.
    fn save(&self, record: &Record) -> Result<(), StoreError>;

    /// Remove a record. Removing a record that doesn't exist succeeds.
    fn delete(&self, owner_id: &str, category: Category) -> Result<(), StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn load(&self, owner_id: &str, category: Category) -> Result<Record, StoreError> {
        (**self).load(owner_id, category)
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        (**self).save(record)
    }

    fn delete(&self, owner_id: &str, category: Category) -> Result<(), StoreError> {
        (**self).delete(owner_id, category)
    }
}
