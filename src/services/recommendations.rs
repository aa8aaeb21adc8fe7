//! Recommendations Service
//!
//! Caches personalized film recommendations per user. Entries stay fresh
//! for a short window (one minute by default) so repeated page views reuse
//! the last result instead of refetching on every render.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::cache::{CachePolicy, CacheStats, FetchCache, Fetcher};
use crate::error::FetchResult;
use crate::models::Recommendation;

/// Per-user cache of recommendation lists.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    cache: FetchCache<String, Vec<Recommendation>>,
}

impl RecommendationService {
    /// Creates the service backed by the real API client.
    pub fn new(api: Arc<ApiClient>, policy: CachePolicy) -> Self {
        Self::with_fetcher(policy, move |user_id: String| {
            let api = Arc::clone(&api);
            async move { api.recommendations(&user_id).await }
        })
    }

    /// Creates the service over an arbitrary fetcher; tests inject closures.
    pub fn with_fetcher<F>(policy: CachePolicy, fetcher: F) -> Self
    where
        F: Fetcher<String, Vec<Recommendation>> + 'static,
    {
        Self {
            cache: FetchCache::new("recommendations", policy, fetcher),
        }
    }

    /// Returns the recommendations for one user, from cache when fresh.
    ///
    /// Concurrent calls for the same user while a fetch is running share
    /// that fetch. Different users never share entries or fetches.
    pub async fn for_user(&self, user_id: &str) -> FetchResult<Vec<Recommendation>> {
        self.cache.get(user_id.to_string()).await
    }

    /// Drops one user's cached recommendations so the next read refetches.
    pub fn invalidate_user(&self, user_id: &str) {
        self.cache.invalidate(&user_id.to_string());
    }

    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
