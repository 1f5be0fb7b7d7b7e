//! Request models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod todo;
pub mod validation;

pub use todo::{NewTodo, TodoRequest};
pub use validation::ValidationError;
