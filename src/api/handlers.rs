//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::admission::Capacity;
use crate::error::{CacheError, Result};
use crate::facade::{CacheFacade, Lookup, Removal};
use crate::models::{
    ErrorResponse, GetResponse, HealthResponse, MessageResponse, SetRequest, SetResponse,
    INVALID_TTL, MISSING_KEY_OR_VALUE,
};
use crate::store::StoreClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache operations over the configured store
    pub facade: CacheFacade,
}

impl AppState {
    /// Creates a new AppState over the given facade.
    pub fn new(facade: CacheFacade) -> Self {
        Self { facade }
    }

    /// Creates a new AppState from a store and a capacity.
    pub fn from_store(store: std::sync::Arc<dyn StoreClient>, capacity: Capacity) -> Self {
        Self::new(CacheFacade::new(store, capacity))
    }
}

/// Handler for GET /
///
/// Liveness greeting.
pub async fn root_handler() -> &'static str {
    "hello from cache gateway"
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.facade.backend_name(),
        state.facade.capacity().limit(),
    ))
}

/// Handler for GET /cache/:key
///
/// Retrieves a value by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    match state.facade.get(&key).await? {
        Lookup::Found(data) => Ok((StatusCode::OK, Json(GetResponse::new(key, data))).into_response()),
        Lookup::NotFound => {
            Ok((StatusCode::NOT_FOUND, Json(MessageResponse::key_not_found())).into_response())
        }
    }
}

/// Handler for POST /cache
///
/// Stores a key-value pair with optional TTL, subject to admission.
pub async fn set_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SetResponse>)> {
    let Json(req) = body.map_err(rejection_to_error)?;

    let cmd = req.into_command().map_err(CacheError::InvalidRequest)?;
    let stored = state.facade.put(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(SetResponse::new(stored.key, stored.value)),
    ))
}

/// Maps an unreadable write body to a validation error.
///
/// A body that parses but does not fit because of its `ttl` gets a ttl-specific
/// message; anything else is reported as a missing key or value.
fn rejection_to_error(rejection: JsonRejection) -> CacheError {
    let text = rejection.body_text();
    debug!("rejected write body: {}", text);

    let message = match rejection {
        // axum prefixes data errors with the offending field path
        JsonRejection::JsonDataError(_) if text.contains("ttl") => INVALID_TTL,
        _ => MISSING_KEY_OR_VALUE,
    };
    CacheError::InvalidRequest(message.to_string())
}

/// Handler for DELETE /cache/:key
///
/// Deletes a key.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    match state.facade.delete(&key).await? {
        Removal::Deleted => {
            Ok((StatusCode::OK, Json(MessageResponse::deleted())).into_response())
        }
        Removal::NotFound => {
            Ok((StatusCode::NOT_FOUND, Json(ErrorResponse::key_not_found())).into_response())
        }
    }
}
