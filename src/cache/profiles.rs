//! Named cache profiles loaded from a JSON file.
//!
//! ```json
//! { "records": { "start_size": 5000, "max_size": 50000, "ttl_secs": 600 } }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::CacheConfig;

/// Sizing for one named cache.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheProfile {
    pub start_size: usize,
    pub max_size: u64,
    #[serde(default)]
    pub ttl_secs: Option<u64>,
    #[serde(default)]
    pub tti_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("no cache profile named '{0}'")]
    Missing(String),

    #[error("cache profile '{name}' is invalid: {reason}")]
    Invalid { name: String, reason: &'static str },

    #[error("failed to read cache profiles: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse cache profiles: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All configured profiles, keyed by cache name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CacheProfiles {
    profiles: HashMap<String, CacheProfile>,
}

impl CacheProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read profiles from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Add or replace a profile (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, profile: CacheProfile) -> Self {
        self.profiles.insert(name.into(), profile);
        self
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Turn the named profile into a cache config.
    pub fn resolve(&self, name: &str) -> Result<CacheConfig, ProfileError> {
        let profile = self
            .profiles
            .get(name)
            .ok_or_else(|| ProfileError::Missing(name.to_string()))?;

        let invalid = |reason| ProfileError::Invalid {
            name: name.to_string(),
            reason,
        };

        if profile.max_size == 0 {
            return Err(invalid("max_size must be positive"));
        }
        if profile.start_size as u64 > profile.max_size {
            return Err(invalid("start_size exceeds max_size"));
        }

        let mut config = CacheConfig::with_capacity(profile.max_size)
            .initial_capacity(profile.start_size);
        if let Some(secs) = profile.ttl_secs {
            config = config.ttl(Duration::from_secs(secs));
        }
        if let Some(secs) = profile.tti_secs {
            config = config.tti(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_resolve_configured_profile() {
        let profiles = CacheProfiles::from_json(
            r#"{ "records": { "start_size": 100, "max_size": 1000, "ttl_secs": 30 } }"#,
        )
        .unwrap();

        let config = profiles.resolve("records").unwrap();
        assert_eq!(config.initial_capacity, Some(100));
        assert_eq!(config.max_capacity, 1000);
        assert_eq!(config.ttl, Some(Duration::from_secs(30)));
        assert!(config.tti.is_none());
    }

    #[test]
    fn test_resolve_missing_profile() {
        let profiles = CacheProfiles::new();
        assert!(matches!(
            profiles.resolve("records"),
            Err(ProfileError::Missing(name)) if name == "records"
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_sizes() {
        let profiles = CacheProfiles::new()
            .with("zero", CacheProfile { start_size: 0, max_size: 0, ttl_secs: None, tti_secs: None })
            .with("inverted", CacheProfile { start_size: 10, max_size: 5, ttl_secs: None, tti_secs: None });

        assert!(matches!(profiles.resolve("zero"), Err(ProfileError::Invalid { .. })));
        assert!(matches!(profiles.resolve("inverted"), Err(ProfileError::Invalid { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "a": {{ "start_size": 1, "max_size": 2 }} }}"#).unwrap();

        let profiles = CacheProfiles::from_file(file.path()).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles.resolve("a").unwrap().max_capacity, 2);
    }

    #[test]
    fn test_from_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            CacheProfiles::from_file(file.path()),
            Err(ProfileError::Parse(_))
        ));
    }
}
