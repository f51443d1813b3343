//! MongoDB-backed Store Adapter

use async_trait::async_trait;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::{options::IndexOptions, Client, Collection, IndexModel};
use tracing::info;

use crate::db::error::StoreError;
use crate::db::schemas::{Interruption, INTERRUPTION_COLLECTION};
use crate::types::TrailError;

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// Store Adapter surface used by the request handlers.
///
/// Backed by MongoDB in production; handler tests substitute an in-memory
/// double. Each operation checks a connection out of the driver's pool and
/// returns it when the call completes; nothing is held across requests.
#[async_trait]
pub trait InterruptionStore: Send + Sync {
    /// Persist a new record. `Duplicate` if its id is already taken.
    async fn insert(&self, record: Interruption) -> Result<(), StoreError>;

    /// Every record in the collection, in storage-native order.
    async fn find_all(&self) -> Result<Vec<Interruption>, StoreError>;

    /// Records matching the given id (0 or 1 given the unique index).
    async fn find_by_id(&self, id: &str) -> Result<Vec<Interruption>, StoreError>;

    /// Replace the entire stored document matching `id` with `record`.
    async fn replace_by_id(&self, id: &str, record: Interruption) -> Result<(), StoreError>;

    /// Delete the record matching `id`.
    async fn remove_by_id(&self, id: &str) -> Result<(), StoreError>;
}

/// MongoDB-backed store for the interruption collection
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<Interruption>,
}

impl MongoStore {
    /// Connect to MongoDB, verify the connection, and apply schema-defined
    /// indexes. Any failure here is fatal at startup.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, TrailError> {
        // Short timeouts so an unreachable database fails startup quickly
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| TrailError::Database(format!("failed to connect to MongoDB: {}", e)))?;

        // Verify connection before serving
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| TrailError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        let collection = client
            .database(db_name)
            .collection::<Interruption>(INTERRUPTION_COLLECTION);
        let store = MongoStore { collection };
        store.apply_indexes().await?;

        Ok(store)
    }

    /// Apply schema-defined indexes. The unique sparse index on `id` is what
    /// backs the duplicate-key guarantee on insert.
    async fn apply_indexes(&self) -> Result<(), TrailError> {
        let schema_indices = Interruption::into_indices();
        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.collection
            .create_indexes(indices)
            .await
            .map_err(|e| TrailError::Database(format!("failed to create indexes: {}", e)))?;

        Ok(())
    }
}

/// Duplicate-key writes come back from the server as error code 11000
fn is_duplicate_key(err: &MongoError) -> bool {
    if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *err.kind {
        return write_error.code == 11000;
    }
    err.to_string().contains("E11000")
}

#[async_trait]
impl InterruptionStore for MongoStore {
    async fn insert(&self, record: Interruption) -> Result<(), StoreError> {
        self.collection.insert_one(record).await.map_err(|e| {
            if is_duplicate_key(&e) {
                StoreError::Duplicate
            } else {
                StoreError::Storage(e.to_string())
            }
        })?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Interruption>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Vec<Interruption>, StoreError> {
        let cursor = self
            .collection
            .find(doc! { "id": id })
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    async fn replace_by_id(&self, id: &str, record: Interruption) -> Result<(), StoreError> {
        let result = self
            .collection
            .replace_one(doc! { "id": id }, record)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn remove_by_id(&self, id: &str) -> Result<(), StoreError> {
        let result = self
            .collection
            .delete_one(doc! { "id": id })
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
