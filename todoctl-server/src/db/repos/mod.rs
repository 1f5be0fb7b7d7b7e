//! Repository implementations for database access
//!
//! Repositories borrow a single connection for their lifetime, so a handler
//! never touches more than the one connection it acquired for its request.

pub mod todos;

pub use todos::{DbError, TodoRepo};
