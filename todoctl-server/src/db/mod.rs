//! Database layer - connection pool, table definition and repository
//!
//! - Connection pool, one pooled connection per request
//! - Table created at startup if absent, no migration history
//! - Writes run in a transaction and rely on affected-row counts,
//!   not check-then-write

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::{DbError, TodoRepo};
pub use schema::{create_tables, Todo};
