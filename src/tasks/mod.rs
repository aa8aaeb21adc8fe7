//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the cache layer
//! is in use.
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired catalog entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
