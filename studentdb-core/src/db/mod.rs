//! Database layer - single connection and the student repository
//!
//! # Design Principles
//!
//! - One `PgConnection` owned by the caller, lent to repositories as `&mut`
//! - One statement per operation, autocommit
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Not-found comes from the affected rows of that one statement

pub mod connection;
pub mod repos;
pub mod schema;

pub use connection::{close, connect};
pub use repos::*;
pub use schema::ensure_schema;
