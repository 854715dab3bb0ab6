//! MongoDB database wrapper.

use mongodb::bson::doc;
use mongodb::sync::{Client, Collection};
use tracing::info;

/// Database wrapper for blocking MongoDB operations.
#[derive(Debug, Clone)]
pub struct Database {
    db: mongodb::sync::Database,
}

impl Database {
    /// Connect to MongoDB with the given URI and database name.
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection string
    /// * `db_name` - Database name to use
    ///
    /// # Errors
    /// Returns error if connection fails.
    pub fn connect(uri: &str, db_name: &str) -> mongodb::error::Result<Self> {
        let client = Client::with_uri_str(uri)?;

        // Ping the database to verify connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .run()?;

        info!("Successfully connected to MongoDB");

        let db = client.database(db_name);

        Ok(Self { db })
    }

    /// Get a typed collection from the database.
    ///
    /// # Arguments
    /// * `name` - Collection name
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
