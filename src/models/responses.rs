//! Response DTOs for the cache gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for a successful read (GET /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub data: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            data: data.into(),
        }
    }
}

/// Response body for a successful write (POST /cache)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was written
    pub key: String,
    /// The value that was written
    pub value: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            message: "Cached successfully".to_string(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Plain message body, used for successful deletes and read misses
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a new MessageResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Body for a successful delete
    pub fn deleted() -> Self {
        Self::new("Deleted successfully")
    }

    /// Body for a read of an absent key
    pub fn key_not_found() -> Self {
        Self::new("Key not found")
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Store backend in use
    pub backend: String,
    /// Configured entry limit, null when unlimited
    pub max_entries: Option<u64>,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(backend: impl Into<String>, max_entries: Option<u64>) -> Self {
        Self {
            status: "healthy".to_string(),
            backend: backend.into(),
            max_entries,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for client-side failures
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Body for a delete of an absent key
    pub fn key_not_found() -> Self {
        Self::new("Key not found")
    }
}

/// Error response body for store failures
#[derive(Debug, Clone, Serialize)]
pub struct StoreErrorResponse {
    /// Generic error label
    pub error: String,
    /// Message of the underlying store failure
    pub details: String,
}

impl StoreErrorResponse {
    /// Creates a new StoreErrorResponse
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            error: "Store error".to_string(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_shape() {
        let resp = GetResponse::new("test_key", "test_value");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value, json!({"key": "test_key", "data": "test_value"}));
    }

    #[test]
    fn test_set_response_shape() {
        let resp = SetResponse::new("my_key", "my_value");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({"message": "Cached successfully", "key": "my_key", "value": "my_value"})
        );
    }

    #[test]
    fn test_not_found_bodies_differ_by_field() {
        let read_miss = serde_json::to_value(MessageResponse::key_not_found()).unwrap();
        let delete_miss = serde_json::to_value(ErrorResponse::key_not_found()).unwrap();
        assert_eq!(read_miss, json!({"message": "Key not found"}));
        assert_eq!(delete_miss, json!({"error": "Key not found"}));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy("memory", Some(10));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""max_entries":10"#));
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
        assert!(json.contains("memory"));
    }

    #[test]
    fn test_store_error_response_shape() {
        let value = serde_json::to_value(StoreErrorResponse::new("GET timed out")).unwrap();
        assert_eq!(value, json!({"error": "Store error", "details": "GET timed out"}));
    }
}
