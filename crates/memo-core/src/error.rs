//! Error types for SimpleMemo core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for SimpleMemo operations.
pub type Result<T> = std::result::Result<T, MemoError>;

/// Core error type for SimpleMemo operations.
#[derive(Debug, Error)]
pub enum MemoError {
    /// A required identifier is missing from configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The host lacks the identity provider capability
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider call failed or returned an unusable payload
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// Persisted data could not be parsed
    #[error("Storage parse error: {0}")]
    StorageParse(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for MemoError {
    fn from(err: std::io::Error) -> Self {
        MemoError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for MemoError {
    fn from(err: serde_json::Error) -> Self {
        MemoError::StorageParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_storage() {
        let err: MemoError = std::io::Error::other("disk full").into();
        assert!(matches!(err, MemoError::Storage(ref msg) if msg.contains("disk full")));
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let parse = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: MemoError = parse.into();
        assert!(matches!(err, MemoError::StorageParse(_)));
        assert!(err.to_string().starts_with("Storage parse error"));
    }
}
