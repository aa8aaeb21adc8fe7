//! Catalog Cache
//!
//! Manual stores for film details, average ratings, and watchlist
//! snapshots. Unlike the fetch caches these do not fetch anything
//! themselves; callers put values in after loading them and read them
//! back until the TTL runs out or the entry is invalidated.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, TtlStore};
use crate::models::{Film, WatchlistEntry};

/// Counter snapshots for each catalog store.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    /// Film detail store counters
    pub films: CacheStats,
    /// Average rating store counters
    pub ratings: CacheStats,
    /// Watchlist snapshot store counters
    pub watchlists: CacheStats,
}

/// Shared store for film details, ratings, and watchlist snapshots.
///
/// All three stores share one TTL. Film details and their rating are
/// cached under the film id; invalidating a film drops both so a reload
/// never pairs fresh details with a stale rating.
#[derive(Debug)]
pub struct CatalogCache {
    ttl: Duration,
    films: RwLock<TtlStore<u32, Film>>,
    ratings: RwLock<TtlStore<u32, f64>>,
    watchlists: RwLock<TtlStore<String, Vec<WatchlistEntry>>>,
}

impl CatalogCache {
    /// Creates the catalog stores with a shared TTL.
    pub fn new(ttl: Duration) -> Self {
        debug!("Created catalog cache (ttl: {:?})", ttl);
        Self {
            ttl,
            films: RwLock::new(TtlStore::new(ttl)),
            ratings: RwLock::new(TtlStore::new(ttl)),
            watchlists: RwLock::new(TtlStore::new(ttl)),
        }
    }

    /// Returns the TTL shared by all three stores.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Films ==

    /// Returns a cached film if present and fresh.
    pub async fn film(&self, film_id: u32) -> Option<Film> {
        // Write lock even for reads: a lookup can expire the entry
        self.films.write().await.get(&film_id)
    }

    /// Caches a film's details under its id.
    pub async fn set_film(&self, film: Film) {
        self.films.write().await.insert(film.id, film);
    }

    // == Ratings ==

    /// Returns a cached average rating if present and fresh.
    pub async fn rating(&self, film_id: u32) -> Option<f64> {
        self.ratings.write().await.get(&film_id)
    }

    /// Caches a film's average rating.
    pub async fn set_rating(&self, film_id: u32, rating: f64) {
        self.ratings.write().await.insert(film_id, rating);
    }

    /// Drops a film's cached details and rating together.
    pub async fn invalidate_film(&self, film_id: u32) {
        let dropped_film = self.films.write().await.remove(&film_id);
        let dropped_rating = self.ratings.write().await.remove(&film_id);
        if dropped_film || dropped_rating {
            debug!("Invalidated catalog entries for film {}", film_id);
        }
    }

    // == Watchlists ==

    /// Returns a cached watchlist snapshot if present and fresh.
    pub async fn watchlist(&self, user_id: &str) -> Option<Vec<WatchlistEntry>> {
        self.watchlists.write().await.get(&user_id.to_string())
    }

    /// Caches one user's watchlist snapshot.
    pub async fn set_watchlist(&self, user_id: impl Into<String>, entries: Vec<WatchlistEntry>) {
        self.watchlists.write().await.insert(user_id.into(), entries);
    }

    /// Drops one user's cached watchlist snapshot.
    pub async fn invalidate_watchlist(&self, user_id: &str) {
        self.watchlists.write().await.remove(&user_id.to_string());
    }

    // == Maintenance ==

    /// Removes every expired entry across all three stores.
    ///
    /// # Returns
    /// The total number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let films = self.films.write().await.cleanup_expired();
        let ratings = self.ratings.write().await.cleanup_expired();
        let watchlists = self.watchlists.write().await.cleanup_expired();
        films + ratings + watchlists
    }

    /// Returns counter snapshots for all three stores.
    pub async fn stats(&self) -> CatalogStats {
        CatalogStats {
            films: self.films.read().await.stats(),
            ratings: self.ratings.read().await.stats(),
            watchlists: self.watchlists.read().await.stats(),
        }
    }
}
