//! Error types for the todo-list API client.
//!
//! # Design
//! The server reports every failure as HTTP 500 with a fixed message, so the
//! client cannot tell store outages from rejected bodies. `ServerError`
//! carries that message; `NotFound` only appears for unrouted paths.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the path is not part of the API.
    #[error("resource not found")]
    NotFound,

    /// The server returned 500 with its `{"error": ...}` body.
    #[error("server error: {message}")]
    ServerError { message: String },

    /// The server returned some other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
