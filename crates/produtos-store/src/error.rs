//! Store error types.

use thiserror::Error;

/// Errors that can occur when using the record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a record.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing table rejected an operation.
    #[error("Store operation failed: {0}")]
    Backend(String),

    /// Key not found.
    #[error("Key not found: {0}")]
    NotFound(String),
}
