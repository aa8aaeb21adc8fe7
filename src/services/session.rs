//! Session Service
//!
//! Caches the signed-in user for the lifetime of the process. The first
//! caller triggers the API request; everyone after that (including callers
//! racing the first one) shares the same result.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::cache::{CachePolicy, CacheStats, FetchCache, Fetcher};
use crate::error::FetchResult;
use crate::models::SessionUser;

/// Process-wide cache for the authenticated user.
///
/// There is exactly one session per process, so the cache holds a single
/// entry under the unit key. With the default policy the entry never
/// expires; it is dropped only by [`invalidate`](Self::invalidate).
#[derive(Debug, Clone)]
pub struct SessionService {
    cache: FetchCache<(), SessionUser>,
}

impl SessionService {
    /// Creates the service backed by the real API client.
    pub fn new(api: Arc<ApiClient>, policy: CachePolicy) -> Self {
        Self::with_fetcher(policy, move |_key: ()| {
            let api = Arc::clone(&api);
            async move { api.session_user().await }
        })
    }

    /// Creates the service over an arbitrary fetcher.
    ///
    /// The production constructor wires the API client through this; tests
    /// inject closures.
    pub fn with_fetcher<F>(policy: CachePolicy, fetcher: F) -> Self
    where
        F: Fetcher<(), SessionUser> + 'static,
    {
        Self {
            cache: FetchCache::new("session", policy, fetcher),
        }
    }

    /// Returns the signed-in user.
    ///
    /// Fetches from the API at most once while the cached value is live;
    /// concurrent callers during that fetch share its outcome. A failed
    /// fetch is returned to every waiting caller and nothing is cached, so
    /// the next call retries.
    pub async fn current_user(&self) -> FetchResult<SessionUser> {
        self.cache.get(()).await
    }

    /// Drops the cached user, e.g. after sign-out or a role change.
    ///
    /// The next [`current_user`](Self::current_user) call fetches again.
    pub fn invalidate(&self) {
        self.cache.invalidate(&());
    }

    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
