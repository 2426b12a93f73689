//! Common error shape returned to API callers.
//!
//! Validation failures and GitHub failures are both reported as an
//! [`ApiError`], so a batch can carry them side by side.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every item was created.
pub const STATUS_CREATED: u16 = 201;

/// Some, but not all, items were created.
pub const STATUS_PARTIAL_CONTENT: u16 = 206;

/// The caller sent something we refuse to forward.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Status used when GitHub cannot be reached or answers with garbage.
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

const STATUS_NOT_FOUND: u16 = 404;

/// An error carrying an HTTP status and a human readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    status: u16,
    message: String,
}

impl ApiError {
    /// Creates an error with an arbitrary status.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a `400 Bad Request` error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(STATUS_BAD_REQUEST, message)
    }

    /// Creates a `404 Not Found` error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(STATUS_NOT_FOUND, message)
    }

    /// Creates a `500 Internal Server Error` error.
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(STATUS_INTERNAL_SERVER_ERROR, message)
    }

    /// Parses an error previously serialized into a response body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `body` is not a serialized [`ApiError`].
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// HTTP status of the error.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Message of the error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
