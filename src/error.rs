//! Error types for the Mailosaur client.

use thiserror::Error;

/// Error type for all Mailosaur client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The client was built without the settings it needs (an API key).
    #[error("client not initialized: {0}")]
    ClientUninitialized(&'static str),
    /// The base URL, or a path joined onto it, is not a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// A response was missing a body or header that the operation requires.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The API answered with an error status.
    ///
    /// The message is built from the status code and, for `400 Bad Request`,
    /// from the per-field validation errors in the response body.
    #[error("{0}")]
    Server(String),
    /// Client-side failure, such as a polling timeout or a malformed server ID.
    #[error("{0}")]
    Generic(String),
    /// Underlying HTTP transport error.
    #[error("http error: {0}")]
    Request(#[from] reqwest::Error),
    /// Response body did not match the expected JSON shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Message carried by a [`Error::Server`] error, if this is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Server(message) => Some(message),
            _ => None,
        }
    }
}
