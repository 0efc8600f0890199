//! Error types for turn processing
//!
//! The state machine itself cannot fail: mismatched actions are no-ops and an
//! unknown session is simply created. What can fail is everything at the edge
//! of a turn:
//!
//! ```text
//! WorkflowError
//! ├── Store             - the session store rejected a read or write
//! ├── Transform         - the transformer returned an error
//! └── TransformTimeout  - the transformer did not answer in time
//! ```
//!
//! Whenever a turn returns one of these, nothing was persisted for that turn,
//! so the caller can retry it unchanged.

use std::time::Duration;

use hil_checkpoint::StoreError;
use thiserror::Error;

use crate::transform::TransformError;

/// Convenience result type using [`WorkflowError`]
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Failure of a single turn
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Reading or writing the session failed
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    /// The transformer failed while deriving output
    #[error("Transform failed: {0}")]
    Transform(#[from] TransformError),

    /// The transformer exceeded the configured bound
    #[error("Transform timed out after {after:?}")]
    TransformTimeout {
        /// The bound that was exceeded
        after: Duration,
    },
}

impl WorkflowError {
    /// Whether the caller sent something unusable (as opposed to an internal fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, WorkflowError::Store(err) if err.is_client_error())
    }

    /// Whether retrying the same turn may succeed
    pub fn is_retryable(&self) -> bool {
        !self.is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_session_id_is_client_error() {
        let err = WorkflowError::from(StoreError::InvalidSessionId(String::new()));
        assert!(err.is_client_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_internal_faults_are_retryable() {
        let errors = [
            WorkflowError::from(StoreError::Storage("down".to_string())),
            WorkflowError::from(TransformError::failed("boom")),
            WorkflowError::TransformTimeout {
                after: Duration::from_millis(10),
            },
        ];

        for err in errors {
            assert!(!err.is_client_error(), "{err}");
            assert!(err.is_retryable(), "{err}");
        }
    }

    #[test]
    fn test_display() {
        let err = WorkflowError::from(TransformError::failed("model offline"));
        assert_eq!(err.to_string(), "Transform failed: model offline");
    }
}
