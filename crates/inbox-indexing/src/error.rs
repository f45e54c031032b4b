//! Error types for index progress tracking.

use thiserror::Error;

/// Errors that can occur while tracking index progress
#[derive(Error, Debug)]
pub enum IndexingError {
    /// The caller cancelled a status push
    #[error("Operation cancelled")]
    OperationCancelled,

    /// Record encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for IndexingError {
    fn from(err: serde_json::Error) -> Self {
        IndexingError::Serialization(err.to_string())
    }
}
