//! Cache registry - Central management for all named caches.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{CacheConfig, CacheProfiles, TypedCache};

#[derive(Debug, Error)]
#[error("cache '{name}' already exists with different types: expected {expected}, got {found}")]
pub struct TypeMismatch {
    pub name: String,
    pub expected: &'static str,
    pub found: &'static str,
}

/// Central registry for managing multiple typed caches.
///
/// Caches are looked up by name. A cache created through
/// [`CacheRegistry::get_or_create_profiled`] takes its sizing from the
/// matching entry in the registry's [`CacheProfiles`].
///
/// ## Example
///
/// ```rust
/// use ownerstore::cache::{CacheConfig, CacheRegistry, TypedCache};
///
/// let registry = CacheRegistry::new();
/// let names: TypedCache<u64, String> = registry
///     .get_or_create("names", CacheConfig::default())
///     .unwrap();
/// names.insert(1, "alice".to_string());
/// ```
#[derive(Clone)]
pub struct CacheRegistry {
    caches: Arc<RwLock<HashMap<String, CacheEntry>>>,
    profiles: Arc<CacheProfiles>,
}

/// Internal cache entry storing type-erased cache.
struct CacheEntry {
    cache: Box<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl CacheEntry {
    fn downcast<K, V>(&self, name: &str) -> Result<TypedCache<K, V>, TypeMismatch>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let mismatch = || TypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<TypedCache<K, V>>(),
            found: self.type_name,
        };

        if self.type_id != TypeId::of::<TypedCache<K, V>>() {
            return Err(mismatch());
        }
        self.cache
            .downcast_ref::<TypedCache<K, V>>()
            .cloned()
            .ok_or_else(mismatch)
    }
}

impl CacheRegistry {
    /// Create a new empty cache registry without profiles.
    pub fn new() -> Self {
        Self::with_profiles(CacheProfiles::default())
    }

    /// Create a registry that sizes profiled caches from `profiles`.
    pub fn with_profiles(profiles: CacheProfiles) -> Self {
        info!("Cache registry initialized with {} profile(s)", profiles.len());
        Self {
            caches: Arc::new(RwLock::new(HashMap::new())),
            profiles: Arc::new(profiles),
        }
    }

    /// Get an existing cache by name.
    ///
    /// Returns `Ok(None)` if the cache doesn't exist, and an error if it
    /// exists with different key/value types.
    pub fn get<K, V>(&self, name: &str) -> Result<Option<TypedCache<K, V>>, TypeMismatch>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        self.caches
            .read()
            .get(name)
            .map(|entry| entry.downcast(name))
            .transpose()
    }

    /// Get an existing cache or create a new one with `config`.
    pub fn get_or_create<K, V>(
        &self,
        name: &str,
        config: CacheConfig,
    ) -> Result<TypedCache<K, V>, TypeMismatch>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        if let Some(cache) = self.get(name)? {
            return Ok(cache);
        }

        let mut caches = self.caches.write();

        // Someone may have created it between our read and write lock.
        if let Some(existing) = caches.get(name) {
            return existing.downcast(name);
        }

        debug!("Creating cache: {} ({:?})", name, config);
        let cache = TypedCache::new(name, config);

        caches.insert(
            name.to_string(),
            CacheEntry {
                cache: Box::new(cache.clone()),
                type_id: TypeId::of::<TypedCache<K, V>>(),
                type_name: std::any::type_name::<TypedCache<K, V>>(),
            },
        );

        Ok(cache)
    }

    /// Get or create a cache sized by its named profile.
    ///
    /// Falls back to [`CacheConfig::fallback`] when the profile is missing
    /// or invalid.
    pub fn get_or_create_profiled<K, V>(&self, name: &str) -> Result<TypedCache<K, V>, TypeMismatch>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        self.get_or_create(name, self.resolve_config(name))
    }

    /// Resolve the config a profiled cache named `name` would be built with.
    pub fn resolve_config(&self, name: &str) -> CacheConfig {
        match self.profiles.resolve(name) {
            Ok(config) => config,
            Err(e) => {
                let fallback = CacheConfig::fallback();
                warn!(
                    "Can't use cache profile for '{}' ({}), falling back to start={} max={}",
                    name,
                    e,
                    fallback.initial_capacity.unwrap_or_default(),
                    fallback.max_capacity
                );
                fallback
            }
        }
    }

    /// Check if a cache with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.caches.read().contains_key(name)
    }

    /// Remove a cache from the registry.
    ///
    /// Returns `true` if the cache was removed.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.caches.write().remove(name).is_some();
        if removed {
            debug!("Removed cache: {}", name);
        }
        removed
    }

    /// Get the number of registered caches.
    pub fn len(&self) -> usize {
        self.caches.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.caches.read().is_empty()
    }

    /// Get a list of all registered cache names.
    pub fn cache_names(&self) -> Vec<String> {
        self.caches.read().keys().cloned().collect()
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let caches = self.caches.read();
        f.debug_struct("CacheRegistry")
            .field("cache_count", &caches.len())
            .field("cache_names", &caches.keys().collect::<Vec<_>>())
            .field("profile_count", &self.profiles.len())
            .finish()
    }
}
