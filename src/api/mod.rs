//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /` - Liveness greeting
//! - `GET /health` - Health check endpoint
//! - `GET /cache/:key` - Retrieve a value by key
//! - `POST /cache` - Store a key-value pair
//! - `DELETE /cache/:key` - Delete a key

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
