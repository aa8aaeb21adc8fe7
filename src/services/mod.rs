//! Services Module
//!
//! Per-resource caches over the film app API, each binding one fetch
//! cache to one endpoint with that resource's freshness policy, plus the
//! facade that wires them all to a shared HTTP client.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;

pub mod catalog;
pub mod recommendations;
pub mod session;
pub mod watchlist;

// Re-export public types
pub use catalog::{CatalogCache, CatalogStats};
pub use recommendations::RecommendationService;
pub use session::SessionService;
pub use watchlist::WatchlistService;

// == Services Facade ==
/// Everything the app needs to read cached data: one shared HTTP client,
/// the three fetch caches, and the catalog stores.
///
/// Cloning is cheap; clones share the same underlying caches.
#[derive(Debug, Clone)]
pub struct Services {
    /// Shared HTTP client
    pub api: Arc<ApiClient>,
    /// Signed-in user cache
    pub session: SessionService,
    /// Per-user recommendations cache
    pub recommendations: RecommendationService,
    /// Per-user watchlist cache
    pub watchlist: WatchlistService,
    /// Manual film, rating, and watchlist stores
    pub catalog: Arc<CatalogCache>,
}

impl Services {
    /// Builds the full service set from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api = Arc::new(ApiClient::from_config(config)?);

        Ok(Self {
            session: SessionService::new(Arc::clone(&api), config.session_policy()),
            recommendations: RecommendationService::new(
                Arc::clone(&api),
                config.recommendations_policy(),
            ),
            watchlist: WatchlistService::new(Arc::clone(&api), config.watchlist_policy()),
            catalog: Arc::new(CatalogCache::new(config.catalog_ttl())),
            api,
        })
    }
}
