//! Errors for typed-in student fields

use std::fmt;

/// Why a value entered at a prompt was rejected
///
/// Display strings are shown to the user verbatim before the field is asked again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank after trimming
    Empty { field: &'static str },

    /// Longer than the column allows, counted in characters
    TooLong { field: &'static str, max: usize },

    /// Parsed as an integer but not usable as a `SERIAL` key
    NotPositive { field: &'static str, value: i64 },

    /// Enrollment date that is not a real `YYYY-MM-DD` calendar day
    InvalidDate { value: String },

    /// Shape check failed (non-numeric id, malformed email)
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::NotPositive { field, value } => {
                write!(f, "{} must be a positive number, got {}", field, value)
            }
            Self::InvalidDate { value } => write!(
                f,
                "enrollment date '{}' is not a valid date, please use YYYY-MM-DD format",
                value
            ),
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
