//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the caller's connection for its lifetime
//! - Handles conflicts via the UNIQUE constraint (no check-then-insert)
//! - Maps sqlx errors into `StudentError` at the statement boundary

pub mod students;

pub use students::{StudentRepo, StudentStore};
