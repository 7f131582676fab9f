//! studentdb-core: student records over PostgreSQL
//!
//! Configuration, validated models, the single-connection manager and the
//! student repository. The console lives in `studentdb-cli`.

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::DatabaseConfig;
pub use db::{StudentRepo, StudentStore};
pub use error::{Result, StudentError};
