//! Watchlist Service
//!
//! Caches each user's watchlist under that user's id. Keying per user
//! means switching accounts can never serve one user's list to another;
//! the short TTL keeps the list close to what the server has after
//! adds and removes from other devices.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::cache::{CachePolicy, CacheStats, FetchCache, Fetcher};
use crate::error::FetchResult;
use crate::models::{WatchlistEntry, WatchlistStatus};

/// Per-user cache of watchlist contents.
#[derive(Debug, Clone)]
pub struct WatchlistService {
    cache: FetchCache<String, Vec<WatchlistEntry>>,
}

impl WatchlistService {
    /// Creates the service backed by the real API client.
    pub fn new(api: Arc<ApiClient>, policy: CachePolicy) -> Self {
        Self::with_fetcher(policy, move |user_id: String| {
            let api = Arc::clone(&api);
            async move { api.watchlist(&user_id).await }
        })
    }

    /// Creates the service over an arbitrary fetcher; tests inject closures.
    pub fn with_fetcher<F>(policy: CachePolicy, fetcher: F) -> Self
    where
        F: Fetcher<String, Vec<WatchlistEntry>> + 'static,
    {
        Self {
            cache: FetchCache::new("watchlist", policy, fetcher),
        }
    }

    /// Returns one user's watchlist, from cache when fresh.
    pub async fn for_user(&self, user_id: &str) -> FetchResult<Vec<WatchlistEntry>> {
        self.cache.get(user_id.to_string()).await
    }

    /// Returns whether a film sits on the user's watchlist.
    ///
    /// Derived from the cached list, so checking several films in a row
    /// costs at most one fetch.
    pub async fn status_for(&self, user_id: &str, movie_id: u32) -> FetchResult<WatchlistStatus> {
        let entries = self.for_user(user_id).await?;
        let status = entries
            .iter()
            .find(|entry| entry.movie_id == movie_id)
            .map(|entry| WatchlistStatus::listed(entry.id.clone()))
            .unwrap_or_else(WatchlistStatus::not_listed);

        Ok(status)
    }

    /// Drops one user's cached watchlist.
    ///
    /// Call after a local add or remove so the next read sees the change
    /// immediately instead of waiting out the TTL.
    pub fn invalidate_user(&self, user_id: &str) {
        self.cache.invalidate(&user_id.to_string());
    }

    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn entry_for(user_id: &str, movie_id: u32) -> WatchlistEntry {
        WatchlistEntry {
            id: format!("wl-{}-{}", user_id, movie_id),
            user_id: user_id.to_string(),
            movie_id,
            is_favorite: false,
        }
    }

    fn counting_service(policy: CachePolicy, calls: Arc<AtomicUsize>) -> WatchlistService {
        WatchlistService::with_fetcher(policy, move |user_id: String| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![entry_for(&user_id, 7)])
            }
        })
    }

    #[tokio::test]
    async fn test_each_user_sees_own_list() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service =
            counting_service(CachePolicy::with_ttl(Duration::from_secs(30)), Arc::clone(&calls));

        let alice = service.for_user("alice").await.unwrap();
        let bob = service.for_user("bob").await.unwrap();

        assert_eq!(alice[0].user_id, "alice");
        assert_eq!(bob[0].user_id, "bob");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_switching_users_never_reuses_entries() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service =
            counting_service(CachePolicy::with_ttl(Duration::from_secs(30)), Arc::clone(&calls));

        // Alice, then Bob, then Alice again within the TTL
        service.for_user("alice").await.unwrap();
        service.for_user("bob").await.unwrap();
        let alice_again = service.for_user("alice").await.unwrap();

        // Alice's second read is a hit on her own entry, not Bob's
        assert_eq!(alice_again[0].user_id, "alice");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(service.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_fresh_list_served_from_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service =
            counting_service(CachePolicy::with_ttl(Duration::from_secs(30)), Arc::clone(&calls));

        service.for_user("alice").await.unwrap();
        service.for_user("alice").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_list_refetched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service =
            counting_service(CachePolicy::with_ttl(Duration::from_millis(50)), Arc::clone(&calls));

        service.for_user("alice").await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        service.for_user("alice").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_status_derived_from_cached_list() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service =
            counting_service(CachePolicy::with_ttl(Duration::from_secs(30)), Arc::clone(&calls));

        // The fetcher lists film 7 for every user
        let listed = service.status_for("alice", 7).await.unwrap();
        let missing = service.status_for("alice", 8).await.unwrap();

        assert!(listed.in_watchlist);
        assert_eq!(listed.watch_list_id.as_deref(), Some("wl-alice-7"));
        assert!(!missing.in_watchlist);
        assert!(missing.watch_list_id.is_none());

        // Both checks shared one cached list
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_after_local_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service =
            counting_service(CachePolicy::with_ttl(Duration::from_secs(30)), Arc::clone(&calls));

        service.for_user("alice").await.unwrap();
        service.invalidate_user("alice");
        service.for_user("alice").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
