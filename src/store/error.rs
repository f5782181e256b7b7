//! Error types for document store operations

use crate::error::AppError;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur against the remote document collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Request could not be sent or timed out
    #[error("Store request failed: {0}")]
    Request(String),

    /// Server answered with a non-success status
    #[error("Store returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Failed to decode store response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Request(err.to_string())
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}
