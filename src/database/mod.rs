//! Database module exports.

pub mod models;
mod mongo;
pub mod repository;
pub mod store;

pub use models::*;
pub use mongo::Database;
pub use repository::{RecordKey, RecordRepository, RepositoryError};
pub use store::{DualStore, DualStoreConfig, FsStore, MemoryStore, MongoStore, RecordStore, StoreError};
