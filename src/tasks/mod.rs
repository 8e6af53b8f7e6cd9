//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Purges expired entries of the in-process store

mod cleanup;

pub use cleanup::spawn_cleanup_task;
