//! Reel Cache - A memoizing fetch cache for the film app API
//!
//! Deduplicates concurrent requests per key, serves cached values until
//! their TTL runs out, and never caches failures.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tasks;

pub use api::ApiClient;
pub use cache::{CachePolicy, FetchCache, Fetcher};
pub use config::Config;
pub use error::{FetchError, FetchResult};
pub use services::Services;
pub use tasks::spawn_cleanup_task;
