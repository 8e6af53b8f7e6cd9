//! Cache Facade
//!
//! Validates and dispatches the get/put/delete operations, consulting the
//! admission controller before writes, and reports each outcome as a typed
//! result for the transport layer to render.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::admission::{Admission, AdmissionController, Capacity};
use crate::error::{CacheError, Result, StoreError};
use crate::store::StoreClient;

// == Commands and Outcomes ==
/// A validated write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutCommand {
    pub key: String,
    pub value: String,
    /// Expiry in seconds; never zero
    pub ttl: Option<u64>,
}

impl PutCommand {
    /// Creates a write command. A ttl of zero means no expiry.
    pub fn new(key: impl Into<String>, value: impl Into<String>, ttl: Option<u64>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ttl: ttl.filter(|t| *t > 0),
        }
    }
}

/// Outcome of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(String),
    NotFound,
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stored {
    pub key: String,
    pub value: String,
}

/// Outcome of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    NotFound,
}

// == Cache Facade ==
/// Entry point for cache operations, shared by all request handlers.
#[derive(Clone)]
pub struct CacheFacade {
    store: Arc<dyn StoreClient>,
    admission: AdmissionController,
}

impl CacheFacade {
    /// Creates a facade over `store`, admitting writes against `capacity`.
    pub fn new(store: Arc<dyn StoreClient>, capacity: Capacity) -> Self {
        let admission = AdmissionController::new(store.clone(), capacity);
        Self { store, admission }
    }

    /// Name of the store backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// The capacity writes are admitted against.
    pub fn capacity(&self) -> Capacity {
        self.admission.capacity()
    }

    // == Get ==
    /// Looks up `key`.
    pub async fn get(&self, key: &str) -> Result<Lookup> {
        require_key(key)?;

        let value = self.store.get(key).await.map_err(|e| store_failure("get", e))?;
        Ok(match value {
            Some(value) => Lookup::Found(value),
            None => {
                debug!("get '{}': not found", key);
                Lookup::NotFound
            }
        })
    }

    // == Put ==
    /// Writes a key-value pair if admission allows it.
    pub async fn put(&self, cmd: PutCommand) -> Result<Stored> {
        if cmd.key.is_empty() || cmd.value.is_empty() {
            return Err(CacheError::InvalidRequest(
                crate::models::MISSING_KEY_OR_VALUE.to_string(),
            ));
        }

        let admission = self
            .admission
            .admit(&cmd.key)
            .await
            .map_err(|e| store_failure("admission", e))?;

        if admission == Admission::Rejected {
            warn!(
                "put '{}': rejected, store is at capacity {:?}",
                cmd.key,
                self.admission.capacity()
            );
            return Err(CacheError::CapacityExceeded);
        }

        self.store
            .set(&cmd.key, &cmd.value, cmd.ttl)
            .await
            .map_err(|e| store_failure("put", e))?;

        debug!("put '{}': stored (ttl={:?})", cmd.key, cmd.ttl);
        Ok(Stored {
            key: cmd.key,
            value: cmd.value,
        })
    }

    // == Delete ==
    /// Removes `key`.
    pub async fn delete(&self, key: &str) -> Result<Removal> {
        require_key(key)?;

        let removed = self
            .store
            .delete(key)
            .await
            .map_err(|e| store_failure("delete", e))?;

        if removed > 0 {
            debug!("delete '{}': removed", key);
            Ok(Removal::Deleted)
        } else {
            debug!("delete '{}': not found", key);
            Ok(Removal::NotFound)
        }
    }
}

fn require_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidRequest("Key is required".to_string()));
    }
    Ok(())
}

fn store_failure(operation: &str, err: StoreError) -> CacheError {
    error!("{} failed: {}", operation, err);
    CacheError::Store(err)
}
