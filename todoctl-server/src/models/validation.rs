//! Validation error types

use std::fmt;

/// Validation error for request payloads and path parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is shorter than its minimum length
    TooShort { field: &'static str, min: usize },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Integer outside an inclusive range
    OutOfRange { field: &'static str, min: i64, max: i64 },

    /// Integer below its lower bound (no upper bound)
    BelowMinimum { field: &'static str, min: i64 },

    /// Input could not be parsed into the expected shape
    Malformed { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::Malformed { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field, min)
            }
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::BelowMinimum { field, min } => {
                write!(f, "{} must be greater than or equal to {}", field, min)
            }
            Self::Malformed { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
