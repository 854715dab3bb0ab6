//! ownerstore - cache-aside access layer for per-owner records.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `cache` - Bounded caching with Moka, named profiles
//! - `database` - Record model, durable stores and the record repository
//!
//! ```rust
//! use ownerstore::cache::CacheRegistry;
//! use ownerstore::database::{Category, MemoryStore, Record, RecordRepository};
//!
//! let repo = RecordRepository::new(MemoryStore::new(), &CacheRegistry::new()).unwrap();
//!
//! // Never-saved records come back as empty defaults.
//! assert!(repo.get("alice", Category::INBOX).unwrap().is_empty());
//!
//! repo.save(&Record::new("alice", Category::INBOX).with("text", "hello")).unwrap();
//! assert_eq!(repo.get("alice", Category::INBOX).unwrap().get_str("text"), Some("hello"));
//! ```

pub mod cache;
pub mod config;
pub mod database;
