//! Error types for engine load operations

use crate::error::AppError;

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while loading data into the engine.
///
/// Search itself never fails; an unmatched query is an empty result set.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// CSV fetch failed (network or HTTP status)
    #[error("Failed to load CSV: {0}")]
    Fetch(String),

    /// CSV parsing failed
    #[error("CSV parsing error: {0}")]
    Parse(String),

    /// Local file read failed
    #[error("CSV read error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        EngineError::Fetch(err.to_string())
    }
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::Parse(err.to_string())
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Io(err) => AppError::Io(err),
            _ => AppError::Load(err.to_string()),
        }
    }
}
