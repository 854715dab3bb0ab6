//! Repository module - cache-aside data access layer.

mod error;
mod key;
mod record_repository;

pub use error::{RepositoryError, Result};
pub use key::RecordKey;
pub use record_repository::{CACHE_NAME, RecordRepository};
