//! Error types for session store operations

use thiserror::Error;

/// Result type for session store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while reading or writing sessions
#[derive(Error, Debug)]
pub enum StoreError {
    /// Session identifier was empty or otherwise unusable as a key
    #[error("Invalid session id: {0:?}")]
    InvalidSessionId(String),

    /// Serialization error (backends that encode state as JSON)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// Whether the failure came from the caller's input rather than the backend
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::InvalidSessionId(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(StoreError::InvalidSessionId(String::new()).is_client_error());
        assert!(!StoreError::Storage("disk gone".to_string()).is_client_error());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Storage("connection reset".to_string());
        assert_eq!(err.to_string(), "Storage error: connection reset");
    }
}
