//! Fetch Cache Module
//!
//! The coalescing cache engine: memoizes successfully fetched values per
//! key and merges concurrent callers for the same key onto a single
//! in-flight retrieval.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats};
use crate::error::{FetchError, FetchResult};

/// A retrieval shared between every caller coalesced onto it.
type SharedFetch<V> = Shared<BoxFuture<'static, FetchResult<V>>>;

// == Cache Policy ==
/// Freshness configuration for a [`FetchCache`].
///
/// A policy without a TTL keeps a value forever once it is populated.
/// A zero TTL is normalized to the same thing at construction, so the
/// freshness check only ever has two cases: no TTL, or an unexpired TTL.
#[derive(Debug, Clone, Copy, Default)]
pub struct CachePolicy {
    ttl: Option<Duration>,
    timeout: Option<Duration>,
}

impl CachePolicy {
    // == Constructors ==
    /// Creates a policy that never expires stored values.
    pub fn cache_forever() -> Self {
        Self::default()
    }

    /// Creates a policy that expires stored values once they reach `ttl`.
    ///
    /// # Arguments
    /// * `ttl` - Maximum age of a stored value; `Duration::ZERO` means no
    ///   expiry at all
    pub fn with_ttl(ttl: Duration) -> Self {
        let ttl = if ttl.is_zero() { None } else { Some(ttl) };
        Self { ttl, timeout: None }
    }

    /// Adds a per-retrieval time limit.
    ///
    /// A retrieval exceeding the limit fails with [`FetchError::Timeout`],
    /// propagated to every waiting caller like any other fetch failure.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    // == Accessors ==
    /// Returns the TTL, or None if stored values never expire.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Returns the per-retrieval time limit, if one is set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// == Fetcher Trait ==
/// The asynchronous retrieval a [`FetchCache`] delegates to on a miss.
///
/// Implemented for any `Fn(K) -> impl Future` closure, so callers usually
/// pass an async closure rather than implementing this by hand. The
/// operation should be an idempotent read: the cache recreates it freely
/// after failures and expiry.
pub trait Fetcher<K, V>: Send + Sync {
    /// Starts one retrieval for `key`.
    fn fetch(&self, key: K) -> BoxFuture<'static, FetchResult<V>>;
}

impl<K, V, F, Fut> Fetcher<K, V> for F
where
    F: Fn(K) -> Fut + Send + Sync,
    Fut: Future<Output = FetchResult<V>> + Send + 'static,
{
    fn fetch(&self, key: K) -> BoxFuture<'static, FetchResult<V>> {
        (self)(key).boxed()
    }
}

// == Per-Key Slot ==
/// State for one key: the stored value, the in-flight retrieval (at most
/// one at any instant), and a generation counter.
///
/// The generation is bumped whenever a new retrieval starts or the key is
/// invalidated. A completing retrieval stores its result only if the slot
/// generation still matches the one it was started under, so a retrieval
/// that was superseded cannot clobber newer state. Slots are never removed
/// from the map, which keeps generations monotonic.
struct Slot<V> {
    stored: Option<CacheEntry<V>>,
    inflight: Option<SharedFetch<V>>,
    generation: u64,
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self {
            stored: None,
            inflight: None,
            generation: 0,
        }
    }
}

/// The slot map and its statistics, guarded together by one mutex so the
/// check-for-value-or-inflight and register-as-inflight steps are a single
/// indivisible operation.
struct Slots<K, V> {
    map: HashMap<K, Slot<V>>,
    stats: CacheStats,
}

impl<K, V> Slots<K, V> {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    fn live_entries(&self) -> usize {
        self.map.values().filter(|slot| slot.stored.is_some()).count()
    }
}

struct CacheInner<K, V> {
    /// Label used in logs, e.g. "session" or "recommendations"
    name: &'static str,
    /// Freshness configuration
    policy: CachePolicy,
    /// The retrieval to run on a miss
    fetcher: Arc<dyn Fetcher<K, V>>,
    /// Per-key state; the lock is never held across an await point
    slots: Mutex<Slots<K, V>>,
}

// == Fetch Cache ==
/// A memoizing async fetch cache with request coalescing and TTL expiry.
///
/// Each instance owns its stored values, the instant they were fetched,
/// and at most one in-flight retrieval per key. Concurrent callers during
/// a miss are merged onto that single retrieval, so N simultaneous `get`
/// calls for the same key cost exactly one fetcher invocation and all N
/// observe the same outcome.
///
/// Staleness is derived lazily from a value's age on each lookup; no
/// background task ever mutates the cache. Cloning is cheap and clones
/// share the same state.
pub struct FetchCache<K, V> {
    inner: Arc<CacheInner<K, V>>,
}

impl<K, V> Clone for FetchCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> fmt::Debug for FetchCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchCache")
            .field("name", &self.inner.name)
            .field("policy", &self.inner.policy)
            .finish_non_exhaustive()
    }
}

impl<K, V> FetchCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a new cache around a fetcher.
    ///
    /// # Arguments
    /// * `name` - Label for log lines
    /// * `policy` - Freshness configuration
    /// * `fetcher` - The retrieval to run on a miss; usually an async
    ///   closure
    pub fn new<F>(name: &'static str, policy: CachePolicy, fetcher: F) -> Self
    where
        F: Fetcher<K, V> + 'static,
    {
        debug!(
            "Created {} cache (ttl: {:?}, timeout: {:?})",
            name,
            policy.ttl(),
            policy.timeout()
        );

        Self {
            inner: Arc::new(CacheInner {
                name,
                policy,
                fetcher: Arc::new(fetcher),
                slots: Mutex::new(Slots::new()),
            }),
        }
    }

    // == Get ==
    /// Returns the value for `key`, fetching it if necessary.
    ///
    /// Evaluated as an ordered decision list:
    /// 1. A stored value that has not reached the TTL (or whose cache has
    ///    no TTL) is returned immediately.
    /// 2. If a retrieval for this key is already in flight, the caller
    ///    awaits that same retrieval rather than starting a new one.
    /// 3. Otherwise a new retrieval starts, is recorded as in flight, and
    ///    its outcome is shared with every caller that joins before it
    ///    completes.
    ///
    /// On success the value is stored together with its fetch time. On
    /// failure nothing is stored and the error propagates to every waiting
    /// caller; the next `get` starts a brand-new retrieval. Dropping a
    /// `get` future abandons only that caller's wait, never the shared
    /// retrieval.
    pub async fn get(&self, key: K) -> FetchResult<V> {
        let fetch = {
            let mut guard = self.inner.slots.lock();
            let slots = &mut *guard;
            let slot = slots.map.entry(key.clone()).or_default();

            if let Some(entry) = &slot.stored {
                if entry.is_fresh(self.inner.policy.ttl()) {
                    slots.stats.record_hit();
                    debug!(
                        "{} cache hit for key {:?} (age: {:?})",
                        self.inner.name,
                        key,
                        entry.age()
                    );
                    return Ok(entry.value.clone());
                }
            }

            if let Some(inflight) = &slot.inflight {
                slots.stats.record_coalesced();
                debug!(
                    "{} cache joining in-flight fetch for key {:?}",
                    self.inner.name, key
                );
                inflight.clone()
            } else {
                if slot.stored.is_some() {
                    slots.stats.record_expiration();
                }
                slots.stats.record_miss();
                slot.generation += 1;

                let fetch = self.start_fetch(key.clone(), slot.generation);
                slot.inflight = Some(fetch.clone());
                debug!("{} cache fetching key {:?}", self.inner.name, key);
                fetch
            }
        };

        fetch.await
    }

    /// Spawns nothing: builds the shared retrieval future that performs
    /// the fetch and then records its outcome. The future is driven by
    /// whichever waiters are polling it.
    fn start_fetch(&self, key: K, generation: u64) -> SharedFetch<V> {
        let inner = Arc::clone(&self.inner);

        let fut = async move {
            let result = match inner.policy.timeout() {
                Some(limit) => {
                    match tokio::time::timeout(limit, inner.fetcher.fetch(key.clone())).await {
                        Ok(result) => result,
                        Err(_) => Err(FetchError::Timeout(limit)),
                    }
                }
                None => inner.fetcher.fetch(key.clone()).await,
            };

            let mut guard = inner.slots.lock();
            let slots = &mut *guard;
            let mut stored_value = false;

            if let Some(slot) = slots.map.get_mut(&key) {
                if slot.generation == generation {
                    slot.inflight = None;
                    match &result {
                        Ok(value) => {
                            // Value and fetch time are written together
                            slot.stored = Some(CacheEntry::new(value.clone()));
                            stored_value = true;
                        }
                        Err(err) => {
                            warn!(
                                "{} cache fetch failed for key {:?}: {}",
                                inner.name, key, err
                            );
                        }
                    }
                } else {
                    // The key was invalidated while this retrieval ran;
                    // deliver the result to its waiters but leave the
                    // slot alone.
                    debug!(
                        "{} cache discarding superseded fetch for key {:?}",
                        inner.name, key
                    );
                }
            }

            if stored_value {
                slots.stats.record_refresh();
                let live = slots.live_entries();
                slots.stats.set_total_entries(live);
                debug!("{} cache stored value for key {:?}", inner.name, key);
            }

            result
        };

        fut.boxed().shared()
    }

    // == Invalidate ==
    /// Drops the stored value for a key.
    ///
    /// Any retrieval currently in flight is detached: its waiters still
    /// receive the outcome they subscribed to, but it no longer populates
    /// the cache. The next `get` starts a fresh retrieval.
    pub fn invalidate(&self, key: &K) {
        let mut guard = self.inner.slots.lock();
        let slots = &mut *guard;

        if let Some(slot) = slots.map.get_mut(key) {
            slot.stored = None;
            slot.inflight = None;
            slot.generation += 1;

            let live = slots.live_entries();
            slots.stats.set_total_entries(live);
            debug!("{} cache invalidated key {:?}", self.inner.name, key);
        }
    }

    // == Invalidate All ==
    /// Drops every stored value and detaches every in-flight retrieval.
    pub fn invalidate_all(&self) {
        let mut guard = self.inner.slots.lock();
        let slots = &mut *guard;

        for slot in slots.map.values_mut() {
            slot.stored = None;
            slot.inflight = None;
            slot.generation += 1;
        }

        slots.stats.set_total_entries(0);
        debug!("{} cache invalidated all keys", self.inner.name);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let guard = self.inner.slots.lock();
        let mut stats = guard.stats.clone();
        stats.set_total_entries(guard.live_entries());
        stats
    }

    // == Accessors ==
    /// Returns the cache's log label.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Returns the freshness configuration.
    pub fn policy(&self) -> CachePolicy {
        self.inner.policy
    }

    // == Length ==
    /// Returns the number of keys currently holding a stored value.
    pub fn len(&self) -> usize {
        self.inner.slots.lock().live_entries()
    }

    // == Is Empty ==
    /// Returns true if no key holds a stored value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
