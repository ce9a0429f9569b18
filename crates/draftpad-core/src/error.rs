//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post not found: {id}")]
    NotFound { id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Key-value store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store I/O failed: {0}")]
    Io(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),

    #[error("Collection could not be (de)serialized: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Serialization(err.to_string())
    }
}
