//! Persistence error types.
//!
//! Reads never fail from the caller's point of view (a bad record is simply
//! replaced), so these errors come from writes and from the storage backends.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error in a file-backed store.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used by this backend.
    #[error("Invalid storage key: {key:?}")]
    InvalidKey { key: String },

    /// Serialization error.
    #[error("Failed to serialize selection record")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the operation (no storage, quota exceeded, ...).
    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the selection to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::InvalidKey { key } => {
                format!("'{key}' cannot be used as a storage key.")
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the selection.".to_string()
            }
            Self::Unavailable { .. } => {
                "Your selection could not be remembered on this device.".to_string()
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_message_hides_backend_details() {
        let err = PersistenceError::Unavailable {
            reason: "QuotaExceededError".to_string(),
        };
        assert_eq!(err.to_string(), "Storage unavailable: QuotaExceededError");
        assert!(!err.user_message().contains("Quota"));
    }
}
