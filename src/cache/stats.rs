//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, coalesced
//! joins, and expirations.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from a stored fresh value
    pub hits: u64,
    /// Number of lookups that found no usable value
    pub misses: u64,
    /// Number of callers that joined a retrieval already in flight
    pub coalesced: u64,
    /// Number of values stored (initial fetches, refreshes, and inserts)
    pub refreshes: u64,
    /// Number of stored values that aged out
    pub expirations: u64,
    /// Current number of stored values
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    /// Coalesced joins count as neither: those callers share someone else's
    /// miss.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Coalesced ==
    /// Increments the coalesced-join counter.
    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }

    // == Record Refresh ==
    /// Increments the stored-value counter.
    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    // == Record Expiration ==
    /// Increments the expiration counter.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
