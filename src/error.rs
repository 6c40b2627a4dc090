//! Error types for ledger and store operations.

use thiserror::Error;

use crate::data::OwnerRef;

/// Errors surfaced by the ledger and by notification stores
#[derive(Error, Debug)]
pub enum Error {
    /// Any failure reported by the underlying notification store
    #[error("Storage error: {0}")]
    Storage(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// The owner has no storage identity yet, so there is nothing to query by
    #[error("Owner {0} has not been persisted")]
    NotPersisted(OwnerRef),
}

impl Error {
    /// Wrap any error as a storage failure
    pub fn storage<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Storage(Box::new(error))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::storage(error)
    }
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;
