//! MongoDB record store.
//!
//! Records live in the `records` collection, one document per
//! (`owner_id`, `category`) pair.

use mongodb::bson::{Document, doc};
use mongodb::options::{IndexOptions, ReplaceOptions};
use mongodb::sync::Collection;
use mongodb::IndexModel;
use tracing::{debug, error};

use super::{RecordStore, StoreError};
use crate::database::Database;
use crate::database::models::{Category, Record};

pub const COLLECTION: &str = "records";

pub struct MongoStore {
    collection: Collection<Record>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Create the unique (owner_id, category) index if it doesn't exist.
    pub fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "category": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).run()?;
        Ok(())
    }
}

/// Query selecting the single document for an owner and category.
pub fn identity_filter(owner_id: &str, category: Category) -> Document {
    doc! { "owner_id": owner_id, "category": i64::from(category.id()) }
}

impl RecordStore for MongoStore {
    fn load(&self, owner_id: &str, category: Category) -> Result<Record, StoreError> {
        let found = self
            .collection
            .find_one(identity_filter(owner_id, category))
            .run()
            .map_err(|e| {
                error!("Failed to load record for {} / {}: {}", owner_id, category, e);
                StoreError::from(e)
            })?;

        found.ok_or_else(|| StoreError::not_found(owner_id, category))
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(identity_filter(&record.owner_id, record.category), record)
            .with_options(options)
            .run()?;

        debug!("Saved record for {} / {}", record.owner_id, record.category);
        Ok(())
    }

    fn delete(&self, owner_id: &str, category: Category) -> Result<(), StoreError> {
        self.collection
            .delete_one(identity_filter(owner_id, category))
            .run()?;
        Ok(())
    }
}
