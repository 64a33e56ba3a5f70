//! Error types for the contact directory.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when reading or writing the contact directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A record with the same identifier already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The underlying record store failed to persist a change
    #[error("Storage error: {0}")]
    Storage(String),

    /// Failed to encode or decode JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure while reading the record store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DirectoryError {
    /// Whether the error was caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::InvalidRequest(_) | Self::Conflict(_)
        )
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with DirectoryError
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DirectoryError::NotFound("contact 7".to_string());
        assert_eq!(err.to_string(), "Resource not found: contact 7");

        let err = DirectoryError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DirectoryError::NotFound("x".into()).is_client_error());
        assert!(DirectoryError::InvalidRequest("x".into()).is_client_error());
        assert!(DirectoryError::Conflict("x".into()).is_client_error());
        assert!(!DirectoryError::Storage("x".into()).is_client_error());
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            var: "EMAIL_PATTERN_TIMEOUT_MS".to_string(),
            reason: "Must be greater than zero".to_string(),
        };
        assert!(err.to_string().contains("EMAIL_PATTERN_TIMEOUT_MS"));
        assert!(err.to_string().contains("greater than zero"));
    }
}
