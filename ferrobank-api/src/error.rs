//! Service error type and HTTP response mapping
//!
//! Validation failures map to specific status codes; anything unexpected is
//! logged server-side and answered with a generic message so internal detail
//! never reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Error type shared by services, repositories, middleware, and jobs
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ferrobank::Error> for ServiceError {
    fn from(error: ferrobank::Error) -> Self {
        match error {
            ferrobank::Error::InvalidAmount(message) => ServiceError::InvalidRequest(message),
            // A stored value that no longer parses is corrupt data, not a
            // client mistake.
            ferrobank::Error::Parse(message) => ServiceError::Database(message),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServiceError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ServiceError::Conflict(message) => (StatusCode::BAD_REQUEST, message),
            ServiceError::InsufficientFunds => {
                (StatusCode::BAD_REQUEST, "insufficient funds".to_string())
            }
            ServiceError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message),
            ServiceError::Unauthenticated(message) => (StatusCode::UNAUTHORIZED, message),
            ServiceError::Database(detail) | ServiceError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
