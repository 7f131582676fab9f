//! Error types for studentdb-core
//!
//! Library callers get a closed taxonomy they can match on; the console
//! reports every variant and keeps running.

use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::models::ValidationError;

pub type Result<T> = std::result::Result<T, StudentError>;

#[derive(Error, Debug)]
pub enum StudentError {
    /// Store unreachable (socket, TLS, protocol or a dead connection)
    #[error("database unreachable: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("{field} '{value}' is already in use")]
    Conflict { field: &'static str, value: String },

    #[error("no student found with ID: {id}")]
    NotFound { id: i32 },

    /// Anything the store rejected that doesn't fit the variants above
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl StudentError {
    /// Classify a raw sqlx error.
    ///
    /// `email` is the value that was being written, reported back on a
    /// uniqueness violation.
    pub fn from_sqlx(err: sqlx::Error, email: Option<&str>) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().is_some_and(|code| is_connection_sqlstate(&code)) {
                return Self::Connection(err);
            }
            match db.kind() {
                ErrorKind::UniqueViolation => {
                    return Self::Conflict {
                        field: "email",
                        value: email
                            .or_else(|| db.constraint())
                            .map(str::to_owned)
                            .unwrap_or_default(),
                    }
                }
                ErrorKind::NotNullViolation => {
                    return Self::Validation(ValidationError::Empty {
                        field: not_null_field(db.message()),
                    })
                }
                ErrorKind::CheckViolation => {
                    return Self::Validation(ValidationError::InvalidFormat {
                        field: "student",
                        reason: "rejected by a table check constraint",
                    })
                }
                _ => {}
            }
        }

        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connection(err),
            other => Self::Database(other),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// True when the store could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<sqlx::Error> for StudentError {
    fn from(err: sqlx::Error) -> Self {
        Self::from_sqlx(err, None)
    }
}

/// Class 08 (connection exception) and the 57P0x shutdown codes, e.g.
/// `57P01` after `pg_terminate_backend` or an admin shutdown.
fn is_connection_sqlstate(code: &str) -> bool {
    code.starts_with("08") || matches!(code, "57P01" | "57P02" | "57P03")
}

// Postgres: `null value in column "first_name" of relation "students" violates ...`
fn not_null_field(message: &str) -> &'static str {
    if message.contains("\"first_name\"") {
        "first name"
    } else if message.contains("\"last_name\"") {
        "last name"
    } else if message.contains("\"email\"") {
        "email"
    } else {
        "required field"
    }
}
