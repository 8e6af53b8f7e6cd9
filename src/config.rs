//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

/// Which store adapter backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Remote Redis server
    Redis,
    /// In-process map, for local runs and tests
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(StoreBackend::Redis),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

/// Server configuration parameters.
///
/// Built once at startup and handed to the components that need it.
/// All values can be configured via environment variables with sensible defaults.
#[derive(Clone)]
pub struct Config {
    /// Store adapter to use
    pub backend: StoreBackend,
    /// Redis host name
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// Redis password, if the server requires one
    pub redis_password: Option<String>,
    /// Redis logical database index
    pub redis_db: i64,
    /// Maximum number of live entries; 0 disables the limit
    pub max_entries: u64,
    /// Timeout applied to every store round trip, in milliseconds
    pub store_timeout_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Expiry sweep interval in seconds (memory backend only)
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `REDIS_HOST` - Redis host (default: 127.0.0.1)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `REDIS_PASSWORD` - Redis password (default: none)
    /// - `REDIS_DB` - Redis database index (default: 0)
    /// - `MAX_ENTRIES` - Maximum live entries, 0 = unlimited (default: 0)
    /// - `STORE_TIMEOUT_MS` - Store round trip timeout (default: 5000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| StoreBackend::parse(&v))
                .unwrap_or(defaults.backend),
            redis_host: env::var("REDIS_HOST")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.redis_host),
            redis_port: parse_var("REDIS_PORT").unwrap_or(defaults.redis_port),
            redis_password: env::var("REDIS_PASSWORD").ok().filter(|v| !v.is_empty()),
            redis_db: parse_var("REDIS_DB").unwrap_or(defaults.redis_db),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            store_timeout_ms: parse_var("STORE_TIMEOUT_MS").unwrap_or(defaults.store_timeout_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Store round trip timeout as a Duration.
    ///
    /// A configured timeout of 0 falls back to the default.
    pub fn store_timeout(&self) -> Duration {
        match self.store_timeout_ms {
            0 => Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redis,
            redis_host: "127.0.0.1".to_string(),
            redis_port: 6379,
            redis_password: None,
            redis_db: 0,
            max_entries: 0,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            server_port: 3000,
            cleanup_interval: 1,
        }
    }
}

// Hand-written so the password never reaches the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("backend", &self.backend)
            .field("redis_host", &self.redis_host)
            .field("redis_port", &self.redis_port)
            .field(
                "redis_password",
                &self.redis_password.as_ref().map(|_| "<redacted>"),
            )
            .field("redis_db", &self.redis_db)
            .field("max_entries", &self.max_entries)
            .field("store_timeout_ms", &self.store_timeout_ms)
            .field("server_port", &self.server_port)
            .field("cleanup_interval", &self.cleanup_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend, StoreBackend::Redis);
        assert_eq!(config.redis_host, "127.0.0.1");
        assert_eq!(config.redis_port, 6379);
        assert!(config.redis_password.is_none());
        assert_eq!(config.max_entries, 0);
        assert_eq!(config.store_timeout(), Duration::from_secs(5));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_zero_store_timeout_uses_default() {
        let config = Config {
            store_timeout_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.store_timeout(), Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS));

        let config = Config {
            store_timeout_ms: 250,
            ..Config::default()
        };
        assert_eq!(config.store_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(StoreBackend::parse("redis"), Some(StoreBackend::Redis));
        assert_eq!(StoreBackend::parse(" Memory "), Some(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse("memcached"), None);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config {
            redis_password: Some("hunter2".to_string()),
            ..Config::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}
