/// Errors raised by the entity services
///
/// Rule, duplicate, not-found and conflict failures carry the message shown to the
/// client. `Storage` wraps repository failures other than unique violations, which
/// are folded into `Duplicate` so both the pre-check and the storage index report
/// the same error.

use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No record with the requested identifier
    #[error("{0}")]
    NotFound(String),

    /// A required field is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// A unique field value is already taken
    #[error("{0}")]
    Duplicate(String),

    /// The record is still referenced by other records
    #[error("{0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Duplicate { message } => Self::Duplicate(message),
            other => Self::Storage(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
