//! CRUD handlers for the interruption collection
//!
//! Each handler is a pure mapping from (method, path, decoded body) to
//! (status, JSON body) via exactly one store call. Update is a full document
//! replacement, not a patch: fields omitted from the body are stored as their
//! zero values, erasing whatever the record held before.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use std::sync::Arc;
use tracing::{error, warn};

use crate::db::schemas::Interruption;
use crate::db::StoreError;
use crate::server::AppState;

/// Failures a handler maps to a client-facing response.
///
/// The closed switch below is the whole error-translation policy: recognized
/// kinds get specific statuses, everything else collapses to a generic 500.
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed to decode
    Validation(String),
    /// Store operation outcome
    Store(StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::Duplicate) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Incorrect body",
            ApiError::Store(StoreError::Duplicate) => "Interruption with this ID already exists",
            ApiError::Store(StoreError::NotFound) => "Interruption not found",
            ApiError::Store(StoreError::Storage(_)) => "Database error",
        }
    }
}

/// POST /int
///
/// Decode the body, stamp a fresh id and the current server time (any id or
/// timestamp the client sent is ignored), and insert.
pub async fn create_interruption(
    state: Arc<AppState>,
    req: Request<Incoming>,
) -> Response<Full<Bytes>> {
    let record = match parse_json_body(req).await {
        Ok(r) => r,
        Err(e) => {
            warn!("failed insert: {:?}", e);
            return error_response(&e);
        }
    };

    insert_stamped(state, record).await
}

/// Stamp and insert a decoded record. Split from body parsing so tests can
/// drive the store mapping directly.
pub(crate) async fn insert_stamped(
    state: Arc<AppState>,
    mut record: Interruption,
) -> Response<Full<Bytes>> {
    record.stamp();

    match state.store.insert(record).await {
        Ok(()) => empty_response(StatusCode::OK),
        Err(e) => {
            if let StoreError::Storage(ref detail) = e {
                error!("failed insert: {}", detail);
            }
            error_response(&ApiError::Store(e))
        }
    }
}

/// GET /int
///
/// The full collection as a pretty-printed JSON array, storage-native order.
pub async fn list_interruptions(state: Arc<AppState>) -> Response<Full<Bytes>> {
    match state.store.find_all().await {
        Ok(records) => records_response(&records),
        Err(e) => {
            error!("failed list: {}", e);
            error_response(&ApiError::Store(e))
        }
    }
}

/// GET /int/:id
///
/// A JSON array of 0 or 1 records matching the path id.
pub async fn search_interruptions(state: Arc<AppState>, id: &str) -> Response<Full<Bytes>> {
    match state.store.find_by_id(id).await {
        Ok(records) => records_response(&records),
        Err(e) => {
            error!("failed search: {}", e);
            error_response(&ApiError::Store(e))
        }
    }
}

/// PUT /int/:id
///
/// Decode the body and replace the entire stored document with it.
pub async fn update_interruption(
    state: Arc<AppState>,
    req: Request<Incoming>,
    id: &str,
) -> Response<Full<Bytes>> {
    let record = match parse_json_body(req).await {
        Ok(r) => r,
        Err(e) => {
            warn!("failed update: {:?}", e);
            return error_response(&e);
        }
    };

    replace_record(state, id, record).await
}

/// Replace the record matching `id` with a decoded replacement.
pub(crate) async fn replace_record(
    state: Arc<AppState>,
    id: &str,
    record: Interruption,
) -> Response<Full<Bytes>> {
    match state.store.replace_by_id(id, record).await {
        Ok(()) => empty_response(StatusCode::NO_CONTENT),
        Err(e) => {
            if let StoreError::Storage(ref detail) = e {
                error!("failed update: {}", detail);
            }
            error_response(&ApiError::Store(e))
        }
    }
}

/// DELETE /int/:id
pub async fn delete_interruption(state: Arc<AppState>, id: &str) -> Response<Full<Bytes>> {
    match state.store.remove_by_id(id).await {
        Ok(()) => empty_response(StatusCode::NO_CONTENT),
        Err(e) => {
            if let StoreError::Storage(ref detail) = e {
                error!("failed delete: {}", detail);
            }
            error_response(&ApiError::Store(e))
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn parse_json_body(req: Request<Incoming>) -> Result<Interruption, ApiError> {
    let body = req
        .collect()
        .await
        .map_err(|e| ApiError::Validation(format!("failed to read body: {}", e)))?;

    decode_body(&body.to_bytes())
}

fn decode_body(bytes: &[u8]) -> Result<Interruption, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::Validation(format!("invalid JSON: {}", e)))
}

/// Serialize records as a pretty-printed (two-space indented) JSON array
fn records_response(records: &[Interruption]) -> Response<Full<Bytes>> {
    match serde_json::to_string_pretty(records) {
        Ok(body) => json_response(body, StatusCode::OK),
        Err(e) => {
            error!("failed to serialize records: {}", e);
            error_response(&ApiError::Store(StoreError::Storage(e.to_string())))
        }
    }
}

fn json_response(body: impl Into<Bytes>, status: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json; charset=utf-8")
        .body(Full::new(body.into()))
        .unwrap()
}

fn empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Error body shape: a JSON object with a single `message` field
fn error_response(err: &ApiError) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "message": err.message() });
    json_response(body.to_string(), err.status())
}
