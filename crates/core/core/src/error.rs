//! Error types for SMS Relay.
//!
//! This module defines the `RelayError` enum returned by store backends and
//! surfaced by the HTTP layer.

use thiserror::Error;

/// The main error type for SMS Relay store operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A storage operation failed.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RelayError {
    /// Creates a new storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns an HTTP status code appropriate for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Storage { .. } | Self::Internal { .. } => 500,
        }
    }
}

/// A Result type alias using RelayError.
pub type RelayResult<T> = Result<T, RelayError>;
