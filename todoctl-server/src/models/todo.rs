//! Todo write payload - title, description, priority, completion flag
//!
//! `TodoRequest` is the raw JSON body. `NewTodo` can only be obtained through
//! `TryFrom<TodoRequest>`, so holding one means every field constraint holds.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Minimum title length in characters
const MIN_TITLE_LEN: usize = 3;

/// Maximum description length in characters
const MAX_DESCRIPTION_LEN: usize = 100;

const MIN_PRIORITY: i64 = 1;
const MAX_PRIORITY: i64 = 5;

/// Incoming body for create and update.
///
/// `complete` must be a JSON boolean; strings and numbers are rejected by
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoRequest {
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub complete: bool,
}

/// Validated todo fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    title: String,
    description: String,
    priority: i64,
    complete: bool,
}

impl NewTodo {
    /// Validate and build a payload from its parts.
    ///
    /// # Rules
    /// - title: at least 3 characters
    /// - description: 1 to 100 characters
    /// - priority: 1 to 5 inclusive
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::NewTodo;
    ///
    /// assert!(NewTodo::new("Go study", "pass tests", 5, false).is_ok());
    /// assert!(NewTodo::new("Go", "pass tests", 5, false).is_err());  // title too short
    /// assert!(NewTodo::new("Go study", "pass tests", 6, false).is_err());  // priority
    /// ```
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: i64,
        complete: bool,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let description = description.into();

        // Lengths count characters, not bytes
        if title.chars().count() < MIN_TITLE_LEN {
            return Err(ValidationError::TooShort {
                field: "title",
                min: MIN_TITLE_LEN,
            });
        }

        let description_len = description.chars().count();
        if description_len == 0 {
            return Err(ValidationError::TooShort {
                field: "description",
                min: 1,
            });
        }
        if description_len > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            });
        }

        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            return Err(ValidationError::OutOfRange {
                field: "priority",
                min: MIN_PRIORITY,
                max: MAX_PRIORITY,
            });
        }

        Ok(Self {
            title,
            description,
            priority,
            complete,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn complete(&self) -> bool {
        self.complete
    }
}

impl TryFrom<TodoRequest> for NewTodo {
    type Error = ValidationError;

    fn try_from(req: TodoRequest) -> Result<Self, Self::Error> {
        Self::new(req.title, req.description, req.priority, req.complete)
    }
}
