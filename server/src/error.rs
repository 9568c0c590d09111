//! Error types for the todo service.
//!
//! Every failure a handler can hit collapses into one wire response:
//! HTTP 500 with `{"error":"Server Error"}`. The detailed cause is only
//! written to the log.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Body sent to clients for any failed request.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// Failures raised by a `TodoStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("BSON encoding error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),

    /// A stored document could not be mapped back to a `Todo`.
    #[error("corrupt document {id}: {reason}")]
    CorruptDocument { id: String, reason: String },
}

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body was missing, not JSON, or did not match the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": SERVER_ERROR_MESSAGE })),
        )
            .into_response()
    }
}

/// Invalid startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),

    #[error("unknown TODO_STORE {0:?} (expected \"mongodb\" or \"memory\")")]
    UnknownStore(String),
}
