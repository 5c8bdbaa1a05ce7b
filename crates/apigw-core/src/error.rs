//! Error types for snapshot operations

use thiserror::Error;

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors that can occur while building or rendering a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A call to the gateway management service failed
    #[error("{operation} failed: {message}")]
    Remote {
        /// Remote operation name (e.g. `GetRestApis`)
        operation: &'static str,
        /// Error text reported by the client
        message: String,
    },

    /// Requested feature is intentionally unavailable
    #[error("{0} is not implemented")]
    NotImplemented(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to serialize the snapshot
    #[error("Failed to serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SnapshotError {
    /// Create a remote error for the given operation
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error came from the remote service
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}
