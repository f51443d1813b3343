//! Store Adapter: persistence for the interruption collection

pub mod error;
pub mod mongo;
pub mod schemas;

pub use error::StoreError;
pub use mongo::{InterruptionStore, IntoIndexes, MongoStore};
