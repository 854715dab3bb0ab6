use thiserror::Error;

use crate::database::store::StoreError;

/// Errors surfaced by [`RecordRepository`](super::RecordRepository).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Caller passed an empty owner id or an unset category.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The store failed for a reason other than a missing record.
    #[error("persistence failed: {0}")]
    PersistenceFailed(#[source] StoreError),
}

impl RepositoryError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_persistence_failed(&self) -> bool {
        matches!(self, Self::PersistenceFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
