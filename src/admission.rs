//! Admission Control
//!
//! Decides whether a write may go ahead given the configured maximum number of
//! live entries.
//!
//! The check is advisory. Size is read with one round trip and the write is a
//! second one, with no lock or transaction around the pair, so concurrent
//! writers that all observe `size < max` are all admitted and the store can
//! overshoot the limit by up to (admitted writers - 1). Size is never cached;
//! every check asks the store again.
//!
//! The check also does not look at whether the key already exists: at capacity,
//! overwriting an existing key is rejected just like inserting a new one.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreError;
use crate::store::StoreClient;

// == Capacity ==
/// Maximum number of live entries the store may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// No limit; every write is admitted
    Unlimited,
    /// At most this many live entries
    Limited(u64),
}

impl Capacity {
    /// Interprets a configured maximum, where 0 means no limit.
    pub fn from_config(max_entries: u64) -> Self {
        if max_entries == 0 {
            Capacity::Unlimited
        } else {
            Capacity::Limited(max_entries)
        }
    }

    /// The configured maximum, or None when unlimited.
    pub fn limit(&self) -> Option<u64> {
        match self {
            Capacity::Unlimited => None,
            Capacity::Limited(max) => Some(*max),
        }
    }

    /// Returns true if a store holding `size` entries has room for one more.
    pub fn has_room(&self, size: u64) -> bool {
        match self {
            Capacity::Unlimited => true,
            Capacity::Limited(max) => size < *max,
        }
    }
}

// == Admission ==
/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The caller may perform the write
    Allowed,
    /// The caller must not perform the write
    Rejected,
}

// == Admission Controller ==
/// Gates writes against the store's current size.
#[derive(Clone)]
pub struct AdmissionController {
    store: Arc<dyn StoreClient>,
    capacity: Capacity,
}

impl AdmissionController {
    /// Creates a controller consulting `store` against `capacity`.
    pub fn new(store: Arc<dyn StoreClient>, capacity: Capacity) -> Self {
        Self { store, capacity }
    }

    /// The configured capacity.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Checks whether a write of `key` may proceed.
    ///
    /// Fails with the store's error if the size query fails; the caller must
    /// then treat the write as rejected with an error.
    pub async fn admit(&self, key: &str) -> Result<Admission, StoreError> {
        let max = match self.capacity {
            Capacity::Unlimited => return Ok(Admission::Allowed),
            Capacity::Limited(max) => max,
        };

        let size = self.store.size().await?;
        let admission = if self.capacity.has_room(size) {
            Admission::Allowed
        } else {
            Admission::Rejected
        };

        debug!(
            "admission for '{}': size={} max={} -> {:?}",
            key, size, max, admission
        );
        Ok(admission)
    }
}
