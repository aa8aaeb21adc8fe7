//! TTL Store Module
//!
//! A plain set/get cache with a store-level TTL and no fetcher: callers
//! populate it explicitly and stale entries are dropped on read or by a
//! periodic sweep. Backs the catalog cache.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};

// == TTL Store ==
/// Keyed storage of [`CacheEntry`] values sharing one TTL.
#[derive(Debug)]
pub struct TtlStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum age before an entry goes stale
    ttl: Duration,
}

impl<K, V> TtlStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new TtlStore with the given TTL.
    ///
    /// # Arguments
    /// * `ttl` - Maximum age of stored values
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Insert ==
    /// Stores a value under a key.
    ///
    /// If the key already exists, the value is overwritten and its age is
    /// reset.
    ///
    /// # Arguments
    /// * `key` - The key to store under
    /// * `value` - The value to store
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.record_refresh();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if present and still fresh. Stale entries are
    /// removed on read and counted as expirations and misses.
    ///
    /// # Arguments
    /// * `key` - The key to retrieve
    pub fn get(&mut self, key: &K) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_fresh(Some(self.ttl)) {
                // Drop the stale entry
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_expiration();
                self.stats.record_miss();
                return None;
            }

            self.stats.record_hit();
            Some(entry.value.clone())
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Remove ==
    /// Removes an entry by key.
    ///
    /// Returns true if an entry was present.
    ///
    /// # Arguments
    /// * `key` - The key to remove
    pub fn remove(&mut self, key: &K) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all stale entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(Some(self.ttl)))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.stats.record_expiration();
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Accessors ==
    /// Returns the store's TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
