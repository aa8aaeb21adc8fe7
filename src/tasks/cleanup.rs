//! TTL Cleanup Task
//!
//! Background task that periodically removes expired catalog entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::services::CatalogCache;

/// Spawns a background task that periodically sweeps the catalog stores.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Only the catalog stores are swept: the fetch caches
/// drop stale entries on read and need no timer.
///
/// # Arguments
/// * `catalog` - Shared reference to the catalog cache
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let catalog = Arc::new(CatalogCache::new(Duration::from_secs(300)));
/// let cleanup_handle = spawn_cleanup_task(catalog.clone(), 900);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    catalog: Arc<CatalogCache>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let removed = catalog.cleanup_expired().await;

            // Log cleanup statistics
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
