//! Registry error types

use thiserror::Error;

use crate::db::store::StoreError;

/// Engine-level error taxonomy
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store signaled a non-positive invitation result code
    #[error("Invitation failed with code {0}")]
    InvitationFailed(i64),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => RegistryError::StoreUnavailable(msg),
            StoreError::Duplicate(msg) => RegistryError::Duplicate(msg),
            StoreError::NotFound(msg) => RegistryError::NotFound(msg),
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
