//! Cache module - Bounded in-memory caching using Moka.
//!
//! ## Architecture
//!
//! - `TypedCache` - Typed wrapper over a Moka cache, implements `BoundedCache`
//! - `CacheRegistry` - Central registry holding all named caches
//! - `CacheProfiles` - Named sizing profiles, with a fixed fallback
//!
//! ## Usage
//!
//! ```rust
//! use ownerstore::cache::{CacheRegistry, TypedCache};
//!
//! let registry = CacheRegistry::new();
//! let cache: TypedCache<u64, String> = registry.get_or_create_profiled("names").unwrap();
//!
//! cache.insert(7, "seven".to_string());
//! assert_eq!(cache.get(&7).as_deref(), Some("seven"));
//! ```

mod config;
mod profiles;
mod registry;
mod typed;

pub use config::{CacheConfig, FALLBACK_MAX_SIZE, FALLBACK_START_SIZE};
pub use profiles::{CacheProfile, CacheProfiles, ProfileError};
pub use registry::{CacheRegistry, TypeMismatch};
pub use typed::{BoundedCache, TypedCache};
