//! Configuration module for ownerstore.
//!
//! Loads configuration from environment variables (and `.env`).

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Which durable store backs the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    Memory,
    #[default]
    Fs,
    Mongo,
}

impl StoreBackend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "fs" | "file" => Some(Self::Fs),
            "mongo" | "mongodb" => Some(Self::Mongo),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be set to use the {backend} store")]
    Missing { name: &'static str, backend: &'static str },

    #[error("invalid value '{value}' for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,

    /// Older store read when the primary has no record; records found there
    /// are migrated into the primary as they are read.
    pub fallback_backend: Option<StoreBackend>,

    /// Root folder for the file-system store
    pub store_dir: PathBuf,

    // MongoDB
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,

    /// Optional JSON file with named cache profiles
    pub cache_profiles: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let var = |name| lookup(vars, name);

        let store_backend = match var("STORE_BACKEND") {
            Some(raw) => StoreBackend::parse(raw).ok_or_else(|| ConfigError::Invalid {
                name: "STORE_BACKEND",
                value: raw.to_string(),
            })?,
            None => StoreBackend::default(),
        };

        let fallback_backend = match var("STORE_FALLBACK") {
            Some(raw) => match StoreBackend::parse(raw) {
                Some(backend) if backend != store_backend => Some(backend),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "STORE_FALLBACK",
                        value: raw.to_string(),
                    });
                }
            },
            None => None,
        };

        let mongodb_uri = var("MONGODB_URI").map(str::to_string);

        // Validate MongoDB URI is set if either store is mongo
        let uses_mongo = store_backend == StoreBackend::Mongo
            || fallback_backend == Some(StoreBackend::Mongo);
        if uses_mongo && mongodb_uri.is_none() {
            return Err(ConfigError::Missing {
                name: "MONGODB_URI",
                backend: "mongo",
            });
        }

        Ok(Self {
            store_backend,
            fallback_backend,
            store_dir: var("STORE_DIR").unwrap_or("./data").into(),
            mongodb_uri,
            mongodb_database: var("MONGODB_DATABASE").unwrap_or("ownerstore").to_string(),
            cache_profiles: var("CACHE_PROFILES").map(PathBuf::from),
        })
    }
}

/// Trimmed value of a variable, treating blank as unset.
fn lookup<'a>(vars: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}
