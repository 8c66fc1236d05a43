//! Error types for the Quanta client.

use thiserror::Error;

use quanta_circuit::ValidationError;

use crate::config::ConfigError;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request could not be sent or timed out.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The service answered but the body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The session was closed before the call could be made.
    #[error("Session closed")]
    Closed,
}

impl ClientError {
    /// Whether the failure happened before a response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// Whether the failure was detected locally.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
