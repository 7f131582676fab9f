//! Student repository
//!
//! Handles the four operations the console exposes:
//! - list: ordered by `student_id`
//! - insert: `RETURNING student_id`
//! - update_email: single UPDATE that also reports the previous email
//! - delete: `RETURNING` the removed row

use async_trait::async_trait;
use sqlx::PgConnection;

use crate::error::{Result, StudentError};
use crate::models::{Email, EmailChange, NewStudent, Student, StudentId};

/// Storage operations for students.
///
/// Implemented by `StudentRepo` over PostgreSQL; the console only sees this trait.
#[async_trait]
pub trait StudentStore: Send {
    /// All students, `student_id` ascending. Empty table gives an empty vec.
    async fn list_all(&mut self) -> Result<Vec<Student>>;

    /// Insert and return the assigned id.
    async fn insert(&mut self, student: &NewStudent) -> Result<StudentId>;

    /// Change one student's email, returning old and new values.
    async fn update_email(&mut self, id: StudentId, new_email: &Email) -> Result<EmailChange>;

    /// Delete one student, returning the removed row.
    async fn delete(&mut self, id: StudentId) -> Result<Student>;
}

/// Student repository
pub struct StudentRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> StudentRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl StudentStore for StudentRepo<'_> {
    async fn list_all(&mut self) -> Result<Vec<Student>> {
        let students: Vec<Student> = sqlx::query_as(
            r#"
            SELECT student_id, first_name, last_name, email, enrollment_date
            FROM students
            ORDER BY student_id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        tracing::debug!(count = students.len(), "listed students");
        Ok(students)
    }

    async fn insert(&mut self, student: &NewStudent) -> Result<StudentId> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO students (first_name, last_name, email, enrollment_date)
            VALUES ($1, $2, $3, $4)
            RETURNING student_id
            "#,
        )
        .bind(student.first_name.as_str())
        .bind(student.last_name.as_str())
        .bind(student.email.as_str())
        .bind(student.enrollment_date)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| StudentError::from_sqlx(e, Some(student.email.as_str())))?;

        tracing::info!(student_id = id, "inserted student");
        Ok(StudentId::new(id)?)
    }

    async fn update_email(&mut self, id: StudentId, new_email: &Email) -> Result<EmailChange> {
        // The FROM-subquery reads the pre-update row, so old and new email come back together
        let change: Option<EmailChange> = sqlx::query_as(
            r#"
            UPDATE students AS s
            SET email = $2
            FROM (SELECT student_id, email FROM students WHERE student_id = $1) AS old
            WHERE s.student_id = old.student_id
            RETURNING s.student_id, s.first_name, s.last_name,
                      old.email AS old_email, s.email AS new_email
            "#,
        )
        .bind(id.get())
        .bind(new_email.as_str())
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| StudentError::from_sqlx(e, Some(new_email.as_str())))?;

        let change = change.ok_or(StudentError::NotFound { id: id.get() })?;
        tracing::info!(student_id = change.student_id, "updated student email");
        Ok(change)
    }

    async fn delete(&mut self, id: StudentId) -> Result<Student> {
        let removed: Student = sqlx::query_as(
            r#"
            DELETE FROM students
            WHERE student_id = $1
            RETURNING student_id, first_name, last_name, email, enrollment_date
            "#,
        )
        .bind(id.get())
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(StudentError::NotFound { id: id.get() })?;

        tracing::info!(student_id = removed.student_id, "deleted student");
        Ok(removed)
    }
}
