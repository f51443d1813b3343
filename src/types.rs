//! Crate-level error types

use thiserror::Error;

/// Errors that terminate the service
///
/// Everything here is fatal at startup or in the accept loop. Per-request
/// failures never surface as this type; they are classified by the Store
/// Adapter (`db::StoreError`) and mapped to HTTP statuses by the handlers.
#[derive(Debug, Error)]
pub enum TrailError {
    #[error("database error: {0}")]
    Database(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrailError>;
