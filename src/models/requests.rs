//! Request DTOs for the cache gateway API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::facade::PutCommand;

/// Message returned when a write request lacks its key or value.
pub const MISSING_KEY_OR_VALUE: &str = "Key and value are required";

/// Message returned when a write request carries a ttl that is not a whole,
/// non-negative number of seconds.
pub const INVALID_TTL: &str = "ttl must be a positive integer number of seconds";

/// Request body for the write operation (POST /cache)
///
/// Fields are optional at the wire level so that a missing key or value is
/// reported as a validation error rather than a deserialization failure.
///
/// # Fields
/// - `key`: The key to store the value under
/// - `value`: The value to store
/// - `ttl`: Optional TTL in seconds
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetRequest {
    /// The cache key
    #[serde(default)]
    pub key: Option<String>,
    /// The value to store
    #[serde(default)]
    pub value: Option<String>,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request and turns it into a facade command.
    ///
    /// Returns an error message if the key or value is missing or empty.
    pub fn into_command(self) -> Result<PutCommand, String> {
        match (self.key, self.value) {
            (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                Ok(PutCommand::new(key, value, self.ttl))
            }
            _ => Err(MISSING_KEY_OR_VALUE.to_string()),
        }
    }
}
