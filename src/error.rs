use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Data load errors (CSV fetch or parse)
    #[error("Load error: {0}")]
    Load(String),

    /// Remote document store errors
    #[error("Store error: {0}")]
    Store(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::Load(_) => "LOAD_ERROR",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Application result type
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_name_their_variant() {
        assert_eq!(AppError::Load("x".to_string()).error_code(), "LOAD_ERROR");
        assert_eq!(AppError::Store("x".to_string()).error_code(), "STORE_ERROR");
        assert_eq!(
            AppError::Internal("x".to_string()).error_code(),
            "INTERNAL_ERROR"
        );
        let io = AppError::from(std::io::Error::other("x"));
        assert_eq!(io.error_code(), "IO_ERROR");
    }
}
