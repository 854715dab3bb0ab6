//! ownerstore - command line access to per-owner records.
//!
//! The store backend, an optional fallback store to migrate from, and
//! cache profiles come from the environment (see `config`); the
//! subcommands go through the cached repository.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ownerstore::cache::{CacheProfiles, CacheRegistry};
use ownerstore::config::{Config, StoreBackend};
use ownerstore::database::{
    Category, Database, DualStore, DualStoreConfig, FsStore, MemoryStore, MongoStore,
    RecordRepository, RecordStore,
};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Debug, Parser)]
#[command(name = "ownerstore", version, about = "Read and write per-owner records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a record (an empty default if none was saved)
    Get {
        owner: String,
        #[arg(value_parser = parse_category)]
        category: Category,
    },
    /// Set one field of a record; VALUE is JSON, or a plain string
    Set {
        owner: String,
        #[arg(value_parser = parse_category)]
        category: Category,
        field: String,
        value: String,
    },
    /// Remove one field of a record
    Unset {
        owner: String,
        #[arg(value_parser = parse_category)]
        category: Category,
        field: String,
    },
    /// Delete a record
    Delete {
        owner: String,
        #[arg(value_parser = parse_category)]
        category: Category,
    },
}

fn parse_category(raw: &str) -> Result<Category, String> {
    Category::parse(raw).ok_or_else(|| format!("unknown category '{raw}'"))
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn open_backend(config: &Config, backend: StoreBackend) -> Result<Box<dyn RecordStore>> {
    Ok(match backend {
        StoreBackend::Memory => Box::new(MemoryStore::new()),
        StoreBackend::Fs => {
            info!("Using file store at {}", config.store_dir.display());
            Box::new(FsStore::new(&config.store_dir))
        }
        StoreBackend::Mongo => {
            let uri = config
                .mongodb_uri
                .as_deref()
                .context("MONGODB_URI must be set")?;
            info!("Connecting to MongoDB...");
            let db = Database::connect(uri, &config.mongodb_database)?;
            let store = MongoStore::new(&db);
            store.ensure_indexes()?;
            Box::new(store)
        }
    })
}

fn open_store(config: &Config) -> Result<Box<dyn RecordStore>> {
    let primary = open_backend(config, config.store_backend)?;

    let Some(fallback) = config.fallback_backend else {
        return Ok(primary);
    };

    info!("Migrating records from {:?} on read", fallback);
    let fallback = open_backend(config, fallback)?;
    Ok(Box::new(DualStore::new(
        primary,
        fallback,
        DualStoreConfig::migration(),
    )))
}

fn main() -> Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ownerstore=info,mongodb=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    info!("Store backend: {:?}", config.store_backend);

    let profiles = match &config.cache_profiles {
        Some(path) => CacheProfiles::from_file(path)
            .with_context(|| format!("loading cache profiles from {}", path.display()))?,
        None => CacheProfiles::default(),
    };
    let registry = CacheRegistry::with_profiles(profiles);

    let repo = RecordRepository::new(open_store(&config)?, &registry)?;

    match cli.command {
        Command::Get { owner, category } => {
            let record = repo.get(&owner, category)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Set {
            owner,
            category,
            field,
            value,
        } => {
            let record = repo.update(&owner, category, |r| {
                r.set(field, parse_value(&value));
            })?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Unset {
            owner,
            category,
            field,
        } => {
            let record = repo.update(&owner, category, |r| {
                r.remove(&field);
            })?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Delete { owner, category } => {
            repo.delete(&owner, category)?;
            info!("Deleted {}/{}", owner, category);
        }
    }

    Ok(())
}
