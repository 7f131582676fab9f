//! Connection lifecycle
//!
//! A single connection, no pool. The caller owns the `PgConnection`;
//! dropping it releases the socket on any exit path, `close` does the
//! graceful protocol shutdown on the normal one.

use sqlx::{Connection, PgConnection};

use crate::config::DatabaseConfig;
use crate::error::{Result, StudentError};

/// Open a connection using the injected config.
///
/// # Errors
///
/// Returns `StudentError::Connection` if the server can't be reached and
/// `StudentError::Database` for rejected credentials or an unknown database.
///
/// # Example
///
/// ```ignore
/// let config = DatabaseConfig::load()?;
/// let mut conn = connect(&config).await?;
/// ```
pub async fn connect(config: &DatabaseConfig) -> Result<PgConnection> {
    let target = config.display_target();
    tracing::debug!(%target, "connecting");

    let conn = PgConnection::connect_with(&config.connect_options())
        .await
        .map_err(StudentError::from)?;

    tracing::info!(%target, "connected to PostgreSQL");
    Ok(conn)
}

/// Close the connection, flushing the terminate message to the server.
pub async fn close(conn: PgConnection) -> Result<()> {
    conn.close().await?;
    tracing::info!("database connection closed");
    Ok(())
}
