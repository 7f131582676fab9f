//! Table bootstrap
//!
//! One idempotent statement. Column changes are out of scope.

use sqlx::PgConnection;

use crate::error::Result;

pub const CREATE_STUDENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        student_id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        enrollment_date DATE
    )
"#;

/// Create the `students` table if it doesn't exist yet.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<()> {
    tracing::debug!("ensuring students table exists");
    sqlx::query(CREATE_STUDENTS_TABLE).execute(&mut *conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Connection, Row};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let mut conn = PgConnection::connect(&url).await.expect("connect failed");
        let mut tx = conn.begin().await.expect("begin failed");

        ensure_schema(&mut tx).await.expect("first run failed");
        ensure_schema(&mut tx).await.expect("second run failed");

        let row = sqlx::query("SELECT to_regclass('public.students') IS NOT NULL AS present")
            .fetch_one(&mut *tx)
            .await
            .expect("query failed");
        assert!(row.get::<bool, _>("present"));

        tx.rollback().await.expect("rollback failed");
    }
}
