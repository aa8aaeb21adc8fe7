//! Cache Module
//!
//! Provides the two in-memory caching primitives of the crate: the
//! coalescing fetch cache (memoized async retrievals, merged in-flight
//! requests, lazy TTL expiry) and the manual TTL store backing the
//! catalog cache.

mod entry;
mod fetch;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use fetch::{CachePolicy, FetchCache, Fetcher};
pub use stats::CacheStats;
pub use store::TtlStore;
