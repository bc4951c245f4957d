//! Error types for the gametl workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every gametl crate.
///
/// Variants follow the failure taxonomy the operator sees: validation
/// problems are reported before anything happens, connection/auth failures
/// come from the model endpoint, persistence failures are recovered and only
/// logged, and engine failures end a job run.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GametlError {
    /// Missing or invalid input before an operation.
    #[error("{0}")]
    Validation(String),

    /// The engine endpoint could not be reached or answered with a failure.
    #[error("{0}")]
    Connection(String),

    /// The engine endpoint rejected the credentials.
    #[error("{0}")]
    Auth(String),

    /// The durable configuration store is unavailable or corrupt.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Error reported by the translation engine while a job was running.
    #[error("{0}")]
    Engine(String),

    /// `start` was called while a job is running.
    #[error("A translation job is already running")]
    JobAlreadyRunning,

    /// `stop` was called while no job is running.
    #[error("No translation job is running")]
    JobNotRunning,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GametlError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates an Engine error
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Whether retrying the same request can succeed.
    ///
    /// Rejected credentials and bad input never fix themselves.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Auth(_) | Self::Validation(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for GametlError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GametlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, GametlError>`.
pub type Result<T> = std::result::Result<T, GametlError>;
