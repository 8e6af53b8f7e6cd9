//! Store Module
//!
//! The key-value store the gateway fronts, seen through the `StoreClient` port.
//! Two adapters are provided: a Redis client for production and an in-process
//! map used by tests and local runs.

mod entry;
mod memory;
mod redis;

use async_trait::async_trait;

use crate::error::StoreError;

pub use entry::Entry;
pub use memory::MemoryStore;
pub use redis::RedisStore;

/// Convenience Result type for store round trips.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Store Client Port ==
/// Operations the gateway needs from a key-value store.
///
/// Every call is an independent round trip. Implementations serialize their own
/// per-key operations but offer no transaction spanning several calls.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Returns the live value stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// With `ttl_secs` the entry expires after that many seconds, otherwise it
    /// never expires.
    async fn set(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> StoreResult<()>;

    /// Removes `key` and returns how many entries were removed.
    async fn delete(&self, key: &str) -> StoreResult<u64>;

    /// Counts the live entries currently held.
    async fn size(&self) -> StoreResult<u64>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
