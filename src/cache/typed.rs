//! Typed cache wrapper around Moka.

use std::hash::Hash;
use std::sync::Arc;

use moka::sync::Cache;

use super::CacheConfig;

/// Capacity-bounded key/value store used by the access layer.
///
/// Implementations synchronize themselves and never fail: `put` may
/// silently evict other entries to stay within capacity.
pub trait BoundedCache<K, V>: Send + Sync {
    /// Look up a value. Returns an owned value the caller may mutate freely.
    fn get(&self, key: &K) -> Option<V>;

    /// Insert or overwrite a value.
    fn put(&self, key: K, value: V);

    /// Drop a value, if present.
    fn invalidate(&self, key: &K);

    /// Approximate number of entries.
    fn entry_count(&self) -> u64;
}

/// A typed cache wrapper that provides a clean API over Moka.
///
/// This cache is:
/// - Thread-safe (moka shards its own locking)
/// - Size-bounded with optional TTL/TTI
/// - Clone-friendly (cloning is cheap, shares the same underlying cache)
///
/// Values come out of [`TypedCache::get`] as clones, so `V` should own
/// all of its data if callers are allowed to mutate what they get back.
pub struct TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Cache<K, V>>,
    name: Arc<str>,
}

// Manual Clone implementation that doesn't require K: Clone, V: Clone
impl<K, V> Clone for TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            name: Arc::clone(&self.name),
        }
    }
}

impl<K, V> TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new typed cache with the given name and config.
    pub fn new(name: impl Into<Arc<str>>, config: CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);

        if let Some(initial) = config.initial_capacity {
            builder = builder.initial_capacity(initial);
        }

        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        if let Some(tti) = config.tti {
            builder = builder.time_to_idle(tti);
        }

        Self {
            inner: Arc::new(builder.build()),
            name: name.into(),
        }
    }

    /// Get the name of this cache.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a key-value pair into the cache.
    pub fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value);
    }

    /// Get a value from the cache.
    ///
    /// Returns `Some(value)` if the key exists and hasn't expired.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key)
    }

    /// Check if a key exists in the cache.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Remove a key from the cache.
    pub fn invalidate(&self, key: &K) {
        self.inner.invalidate(key);
    }

    /// Get the number of entries in the cache.
    ///
    /// Note: This may not be perfectly accurate due to concurrent operations.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Flush moka's pending maintenance so `entry_count` is current.
    pub fn sync(&self) {
        self.inner.run_pending_tasks();
    }
}

impl<K, V> BoundedCache<K, V> for TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        TypedCache::get(self, key)
    }

    fn put(&self, key: K, value: V) {
        self.insert(key, value);
    }

    fn invalidate(&self, key: &K) {
        TypedCache::invalidate(self, key);
    }

    fn entry_count(&self) -> u64 {
        TypedCache::entry_count(self)
    }
}

impl<K, V> std::fmt::Debug for TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedCache")
            .field("name", &self.name)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}
