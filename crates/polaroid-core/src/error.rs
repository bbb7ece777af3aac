//! Error types for record store operations.
//!
//! This module provides a unified error type with explicit variants for
//! transport, protocol, decoding, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for record store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or filesystem transport errors.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Protocol errors (non-success status codes from the store).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The store answered, but the body was not a list of photo rows.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input validation errors (invalid URL, collection name).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local I/O error (file-backed store).
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Transport(TransportError::Io {
            message: err.to_string(),
        })
    }
}

/// Protocol-level errors from a store response.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Store error code (if present).
    pub code: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid store URL.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    /// Invalid collection name.
    #[error("invalid collection '{value}': {reason}")]
    Collection { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::new(
            401,
            Some("PGRST301".to_string()),
            Some("JWT expired".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 401 [PGRST301]: JWT expired");
    }

    #[test]
    fn protocol_error_display_status_only() {
        let err = ProtocolError::new(500, None, None);
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn io_error_is_transport() {
        let err: Error = std::io::Error::other("disk gone").into();
        assert!(matches!(err, Error::Transport(TransportError::Io { .. })));
    }
}
