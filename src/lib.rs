//! Trail - interruption tracking HTTP API backed by MongoDB
//!
//! A thin CRUD service: each request maps to exactly one operation against a
//! single `interruptions` collection. Identifier assignment, uniqueness
//! enforcement, and error-to-status translation are the whole of the logic.

pub mod config;
pub mod db;
pub mod routes;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{Result, TrailError};
