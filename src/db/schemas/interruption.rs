//! Interruption document schema
//!
//! The single record type managed by this service: an arbitrary labeled event
//! with a timestamp and classification tag.

use bson::{doc, Document};
use chrono::Utc;
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::mongo::IntoIndexes;

/// Collection name for interruptions
pub const INTERRUPTION_COLLECTION: &str = "interruptions";

/// Interruption document stored in MongoDB
///
/// Every field decodes permissively: a request body may omit any of them and
/// the missing fields take their zero values. Updates replace the whole
/// document, so an omitted field is erased rather than preserved.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Interruption {
    /// Server-assigned UUID, the sole lookup/update/delete key
    #[serde(default)]
    pub id: String,

    /// Free-text description, client-supplied
    #[serde(default)]
    pub what: String,

    /// Unix timestamp in seconds, assigned by the server at creation
    #[serde(default)]
    pub when: i64,

    /// Opaque classification tag, meaning defined by the client
    #[serde(default)]
    pub method: i32,
}

impl Interruption {
    /// Assign a fresh unique id and the current server time (UTC seconds).
    ///
    /// Called on create; whatever id or timestamp the client sent is discarded.
    pub fn stamp(&mut self) {
        self.id = Uuid::new_v4().to_string();
        self.when = Utc::now().timestamp();
    }
}

impl IntoIndexes for Interruption {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Unique sparse index on id, built in the background
            (
                doc! { "id": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .sparse(true)
                        .background(true)
                        .name("id_unique".to_string())
                        .build(),
                ),
            ),
        ]
    }
}
