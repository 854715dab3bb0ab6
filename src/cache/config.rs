//! Cache configuration.

use std::time::Duration;

/// Start size used when no profile is configured for a cache.
pub const FALLBACK_START_SIZE: usize = 5_000;

/// Max size used when no profile is configured for a cache.
pub const FALLBACK_MAX_SIZE: u64 = 50_000;

/// Configuration for a cache instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of entries the cache pre-allocates room for.
    pub initial_capacity: Option<usize>,

    /// Maximum number of entries in the cache.
    pub max_capacity: u64,

    /// Time-to-live for cache entries.
    /// After this duration, entries are automatically evicted.
    pub ttl: Option<Duration>,

    /// Time-to-idle for cache entries.
    /// Entries are evicted if not accessed within this duration.
    pub tti: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

impl CacheConfig {
    /// Create a new cache config with the given max capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            initial_capacity: None,
            max_capacity,
            ttl: None,
            tti: None,
        }
    }

    /// Fixed sizing used when a named profile can't be resolved.
    /// Entries never expire on time, only on capacity.
    pub fn fallback() -> Self {
        Self {
            initial_capacity: Some(FALLBACK_START_SIZE),
            max_capacity: FALLBACK_MAX_SIZE,
            ttl: None,
            tti: None,
        }
    }

    /// Set the number of entries to pre-allocate.
    #[must_use]
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = Some(initial_capacity);
        self
    }

    /// Set max capacity for cache (builder pattern).
    #[must_use]
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set time-to-live for cache entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = Some(duration);
        self
    }

    /// Set time-to-idle for cache entries.
    #[must_use]
    pub fn tti(mut self, duration: Duration) -> Self {
        self.tti = Some(duration);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_sizes() {
        let config = CacheConfig::default();
        assert_eq!(config.initial_capacity, Some(5_000));
        assert_eq!(config.max_capacity, 50_000);
        assert!(config.ttl.is_none());
        assert!(config.tti.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = CacheConfig::with_capacity(10)
            .initial_capacity(4)
            .ttl(Duration::from_secs(60));

        assert_eq!(config.initial_capacity, Some(4));
        assert_eq!(config.max_capacity, 10);
        assert_eq!(config.ttl, Some(Duration::from_secs(60)));
    }
}
