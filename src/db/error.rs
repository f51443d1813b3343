//! Store operation outcome classification

use thiserror::Error;

/// Closed set of failure kinds a store operation can report.
///
/// Handlers switch on the variant to pick the client-facing status code; the
/// detail carried by `Storage` is logged server-side and never sent to clients.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No record matches the given id
    #[error("no record matches the given id")]
    NotFound,

    /// A record with this id already exists (unique index violation)
    #[error("a record with this id already exists")]
    Duplicate,

    /// Any other database failure (connectivity, query execution)
    #[error("storage failure: {0}")]
    Storage(String),
}
