//! todoctl-server: HTTP server for todo records
//!
//! Five endpoints over a single `todos` table. Each request validates its
//! input, runs one query or mutation against SQLite and answers with a
//! status code.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
