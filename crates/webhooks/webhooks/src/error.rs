//! Webhook error types.

use sms_relay_core::RelayError;
use thiserror::Error;

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;

/// Error type for webhook ingest.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request method is not in the allowed set.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The request body could not be read.
    #[error("Unreadable body: {0}")]
    UnreadableBody(String),

    /// The body is not a valid SMS payload.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The payload secret does not match the configured one.
    #[error("Invalid secret")]
    InvalidSecret,

    /// The message could not be stored.
    #[error(transparent)]
    Storage(#[from] RelayError),
}

impl WebhookError {
    /// Returns an HTTP status code appropriate for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed(_) => 405,
            Self::UnreadableBody(_) | Self::InvalidPayload(_) => 400,
            Self::InvalidSecret => 401,
            Self::Storage(err) => err.status_code(),
        }
    }

    /// Short reason phrase sent back to the caller.
    ///
    /// Detail stays in the logs; senders only learn which check failed.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed(_) => "Method not allowed",
            Self::UnreadableBody(_) | Self::InvalidPayload(_) => "Bad request",
            Self::InvalidSecret => "Unauthorized",
            Self::Storage(_) => "Internal server error",
        }
    }
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::InvalidPayload(err.to_string())
    }
}
