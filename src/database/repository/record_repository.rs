//! Record repository with cache-aside loading.
//!
//! Reads check the cache first and fall back to the store, populating the
//! cache on the way out. A record that was never saved is not an error:
//! the repository materializes an empty default for it. Writes go to the
//! store first and only touch the cache once the store confirmed them.
//!
//! Records never leave or enter the cache by reference. Callers always get
//! their own copy, and the cache always keeps its own.

use tracing::{debug, error};

use super::error::{RepositoryError, Result};
use super::key::RecordKey;
use crate::cache::{BoundedCache, CacheRegistry, TypeMismatch, TypedCache};
use crate::database::models::{Category, Record};
use crate::database::store::{RecordStore, StoreError};

/// Name of the cache (and cache profile) used for records.
pub const CACHE_NAME: &str = "records";

/// Repository for per-owner records.
pub struct RecordRepository<S, C = TypedCache<RecordKey, Record>> {
    store: S,
    cache: C,
}

impl<S: RecordStore> RecordRepository<S> {
    /// Create a repository whose cache is the registry's `records` cache,
    /// sized by the `records` profile.
    pub fn new(store: S, registry: &CacheRegistry) -> std::result::Result<Self, TypeMismatch> {
        let cache = registry.get_or_create_profiled(CACHE_NAME)?;
        Ok(Self::with_cache(store, cache))
    }
}

impl<S, C> RecordRepository<S, C>
where
    S: RecordStore,
    C: BoundedCache<RecordKey, Record>,
{
    pub fn with_cache(store: S, cache: C) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the record for an owner and category.
    ///
    /// Returns an empty default record if nothing was ever saved.
    pub fn get(&self, owner_id: &str, category: Category) -> Result<Record> {
        validate(owner_id, category)?;
        let key = RecordKey::new(owner_id, category);

        if let Some(cached) = self.cache.get(&key) {
            debug!("Record {} served from cache", key);
            return Ok(cached);
        }

        match self.store.load(owner_id, category) {
            Ok(loaded) => {
                debug!("Record {} loaded from store", key);
                self.cache.put(key, loaded.clone());
                Ok(loaded)
            }
            Err(StoreError::NotFound { .. }) => {
                debug!("Record {} not stored yet, creating default", key);
                let fresh = Record::new(owner_id, category);
                self.cache.put(key, fresh.clone());
                Ok(fresh)
            }
            Err(e) => {
                error!("Store failed to load {}: {}", key, e);
                Err(RepositoryError::PersistenceFailed(e))
            }
        }
    }

    /// Save a record to the store, then to the cache.
    ///
    /// Overwrites whatever the cache held for the same identity.
    pub fn save(&self, record: &Record) -> Result<()> {
        validate(&record.owner_id, record.category)?;

        if let Err(e) = self.store.save(record) {
            error!(
                "Store failed to save {}/{}: {}",
                record.owner_id, record.category, e
            );
            return Err(RepositoryError::PersistenceFailed(e));
        }

        let key = RecordKey::new(&record.owner_id, record.category);
        debug!("Saved record {}", key);
        self.cache.put(key, record.clone());

        Ok(())
    }

    /// Delete a record from the store, then from the cache.
    ///
    /// A following `get` returns a fresh default.
    pub fn delete(&self, owner_id: &str, category: Category) -> Result<()> {
        validate(owner_id, category)?;
        let key = RecordKey::new(owner_id, category);

        if let Err(e) = self.store.delete(owner_id, category) {
            error!("Store failed to delete {}: {}", key, e);
            return Err(RepositoryError::PersistenceFailed(e));
        }

        debug!("Deleted record {}", key);
        self.cache.invalidate(&key);
        Ok(())
    }

    /// Read-modify-write on the caller's copy of a record.
    ///
    /// Not atomic: a concurrent `save` for the same record may be
    /// overwritten.
    pub fn update<F>(&self, owner_id: &str, category: Category, f: F) -> Result<Record>
    where
        F: FnOnce(&mut Record),
    {
        let mut record = self.get(owner_id, category)?;
        f(&mut record);

        // Identity is fixed by the arguments, not by the closure.
        record.owner_id = owner_id.to_string();
        record.category = category;

        self.save(&record)?;
        Ok(record)
    }

    /// Drop the cached copy so the next `get` reloads from the store.
    pub fn invalidate(&self, owner_id: &str, category: Category) -> Result<()> {
        validate(owner_id, category)?;
        self.cache.invalidate(&RecordKey::new(owner_id, category));
        Ok(())
    }

    /// Approximate number of cached records.
    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }
}

fn validate(owner_id: &str, category: Category) -> Result<()> {
    if owner_id.is_empty() {
        return Err(RepositoryError::InvalidArgument("owner id is empty"));
    }
    if !category.is_set() {
        return Err(RepositoryError::InvalidArgument("category is unset"));
    }
    Ok(())
}
