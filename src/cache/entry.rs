//! Cache Entry Module
//!
//! Defines the structure for individual cache entries. Freshness is derived
//! lazily from the entry's age, so no timer ever has to touch an entry.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A successfully fetched value together with the instant it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant the value was stored
    pub fetched_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current instant.
    ///
    /// # Arguments
    /// * `value` - The value to store
    pub fn new(value: V) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still fresh under the given TTL.
    ///
    /// Boundary condition: an entry is considered stale when its age is
    /// greater than or equal to the TTL. Once the TTL duration has fully
    /// elapsed, the entry is immediately stale.
    ///
    /// # Arguments
    /// * `ttl` - Maximum age before the entry goes stale; `None` means the
    ///   entry never expires
    ///
    /// # Returns
    /// - `true` if there is no TTL, or the TTL has not elapsed yet
    /// - `false` once the entry's age has reached the TTL
    pub fn is_fresh(&self, ttl: Option<Duration>) -> bool {
        match ttl {
            Some(ttl) => self.fetched_at.elapsed() < ttl,
            None => true,
        }
    }

    // == Age ==
    /// Returns how long ago the value was stored.
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    // == Time To Live ==
    /// Returns remaining time before the entry goes stale, or None if the
    /// entry never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry is already stale
    /// - `Some(remaining)` if the TTL has not elapsed yet
    /// - `None` if there is no TTL
    pub fn ttl_remaining(&self, ttl: Option<Duration>) -> Option<Duration> {
        ttl.map(|ttl| ttl.saturating_sub(self.age()))
    }
}
