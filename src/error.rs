//! Error types for the cache gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{ErrorResponse, StoreErrorResponse};

// == Store Error Enum ==
/// Failure of a round trip to the backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not reach the store or open a connection
    #[error("connection failed: {0}")]
    Connection(String),

    /// The store rejected or failed a command
    #[error("{command} failed: {message}")]
    Command {
        command: &'static str,
        message: String,
    },

    /// The store did not answer within the configured timeout
    #[error("{command} timed out after {timeout_ms}ms")]
    Timeout {
        command: &'static str,
        timeout_ms: u64,
    },
}

// == Cache Error Enum ==
/// Unified error type for facade operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Caller input failed validation; the store was not touched
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Admission denied the write because the store is at capacity
    #[error("Cache capacity exceeded")]
    CapacityExceeded,

    /// The backing store failed or timed out
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        match self {
            CacheError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            CacheError::CapacityExceeded => (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("Cache capacity exceeded")),
            )
                .into_response(),
            CacheError::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StoreErrorResponse::new(err.to_string())),
            )
                .into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for facade operations.
pub type Result<T> = std::result::Result<T, CacheError>;
