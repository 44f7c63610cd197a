//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never completed (connect, I/O, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error status with an `error` message in the body
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Error status without a readable `error` message
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status whose body still carries an `error` message
    #[error("{message}")]
    Rejected { message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message the service itself reported, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::Rejected { message } => Some(message),
            _ => None,
        }
    }

    /// Server message, or `fallback` when the failure carried none
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
