//! Cache Gateway - HTTP facade over a key-value store
//!
//! Exposes get, set (with optional expiry) and delete over HTTP, with an
//! optional bound on the number of live entries enforced at write time.

pub mod admission;
pub mod api;
pub mod config;
pub mod error;
pub mod facade;
pub mod models;
pub mod store;
pub mod tasks;

#[cfg(test)]
mod property_tests;

pub use admission::{Admission, AdmissionController, Capacity};
pub use api::AppState;
pub use config::{Config, StoreBackend};
pub use facade::{CacheFacade, Lookup, PutCommand, Removal, Stored};
pub use tasks::spawn_cleanup_task;
