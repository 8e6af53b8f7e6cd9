//! In-Memory Store Module
//!
//! HashMap-backed `StoreClient` with TTL expiration, used for tests and for
//! running the gateway without a Redis server.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::entry::current_timestamp_ms;
use super::{Entry, StoreClient, StoreResult};

// == Memory Store ==
/// In-process key-value store.
///
/// Expired entries are invisible to reads and to `size` even before the
/// cleanup task purges them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Purge Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Number of entries physically held, expired or not.
    pub async fn raw_len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it unless a writer replaced it in the meantime
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(Entry::is_expired) {
            entries.remove(key);
        }
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> StoreResult<()> {
        let entry = Entry::new(value.to_string(), ttl_secs);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<u64> {
        let removed = self.entries.write().await.remove(key);
        Ok(match removed {
            Some(entry) if !entry.is_expired() => 1,
            _ => 0,
        })
    }

    async fn size(&self) -> StoreResult<u64> {
        let now = current_timestamp_ms();
        let entries = self.entries.read().await;
        Ok(entries.values().filter(|e| !e.is_expired_at(now)).count() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
