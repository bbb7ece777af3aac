//! Feed-level error type.

use thiserror::Error;

/// A load that did not produce a record list.
///
/// Network failures, store-side errors and malformed responses all collapse
/// into this one kind; the message is whatever the store layer reported.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchFailed {
    message: String,
}

impl FetchFailed {
    /// Create a fetch failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<polaroid_core::Error> for FetchFailed {
    fn from(err: polaroid_core::Error) -> Self {
        Self::new(err.to_string())
    }
}
