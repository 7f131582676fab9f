//! Repository tests against a live PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p studentdb-core -- --ignored
//!
//! Tests that write run inside a transaction that is rolled back, so the
//! target database is left untouched.

use chrono::NaiveDate;
use sqlx::{Connection, PgConnection};
use studentdb_core::db::ensure_schema;
use studentdb_core::models::{Email, NewStudent, StudentId};
use studentdb_core::{StudentError, StudentRepo, StudentStore};
use uuid::Uuid;

async fn connect() -> PgConnection {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    PgConnection::connect(&url).await.expect("connect failed")
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4().simple())
}

fn alice(email: &str) -> NewStudent {
    NewStudent::parse("Alice", "Johnson", email, "2024-01-15").unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn insert_then_list_includes_exactly_one_new_record() {
    let mut conn = connect().await;
    let mut tx = conn.begin().await.unwrap();
    ensure_schema(&mut tx).await.unwrap();

    let email = unique_email("alice");
    let mut repo = StudentRepo::new(&mut tx);
    let before = repo.list_all().await.unwrap();
    let id = repo.insert(&alice(&email)).await.unwrap();
    let after = repo.list_all().await.unwrap();

    assert_eq!(after.len(), before.len() + 1);
    let matching: Vec<_> = after.iter().filter(|s| s.student_id == id.get()).collect();
    assert_eq!(matching.len(), 1);

    let student = matching[0];
    assert_eq!(student.first_name, "Alice");
    assert_eq!(student.last_name, "Johnson");
    assert_eq!(student.email, email);
    assert_eq!(student.enrollment_date, NaiveDate::from_ymd_opt(2024, 1, 15));

    drop(repo);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_is_ordered_by_id() {
    let mut conn = connect().await;
    let mut tx = conn.begin().await.unwrap();
    ensure_schema(&mut tx).await.unwrap();

    let mut repo = StudentRepo::new(&mut tx);
    repo.insert(&alice(&unique_email("a"))).await.unwrap();
    repo.insert(&alice(&unique_email("b"))).await.unwrap();

    let ids: Vec<i32> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.student_id)
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);

    drop(repo);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_email_is_conflict() {
    let mut conn = connect().await;
    let mut tx = conn.begin().await.unwrap();
    ensure_schema(&mut tx).await.unwrap();

    let email = unique_email("dup");
    let mut repo = StudentRepo::new(&mut tx);
    repo.insert(&alice(&email)).await.unwrap();

    let err = repo.insert(&alice(&email)).await.unwrap_err();
    match err {
        StudentError::Conflict { field, value } => {
            assert_eq!(field, "email");
            assert_eq!(value, email);
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    drop(repo);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_email_changes_only_email() {
    let mut conn = connect().await;
    let mut tx = conn.begin().await.unwrap();
    ensure_schema(&mut tx).await.unwrap();

    let old_email = unique_email("old");
    let new_email = Email::new(&unique_email("new")).unwrap();
    let mut repo = StudentRepo::new(&mut tx);
    let id = repo.insert(&alice(&old_email)).await.unwrap();

    let change = repo.update_email(id, &new_email).await.unwrap();
    assert_eq!(change.student_id, id.get());
    assert_eq!(change.old_email, old_email);
    assert_eq!(change.new_email, new_email.as_str());

    let student = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.student_id == id.get())
        .expect("student missing after update");
    assert_eq!(student.email, new_email.as_str());
    assert_eq!(student.first_name, "Alice");
    assert_eq!(student.last_name, "Johnson");
    assert_eq!(student.enrollment_date, NaiveDate::from_ymd_opt(2024, 1, 15));

    drop(repo);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_email_to_taken_address_is_conflict() {
    let mut conn = connect().await;
    let mut tx = conn.begin().await.unwrap();
    ensure_schema(&mut tx).await.unwrap();

    let taken = unique_email("taken");
    let mut repo = StudentRepo::new(&mut tx);
    repo.insert(&alice(&taken)).await.unwrap();
    let id = repo.insert(&alice(&unique_email("other"))).await.unwrap();

    let err = repo
        .update_email(id, &Email::new(&taken).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, StudentError::Conflict { .. }), "got {err:?}");

    drop(repo);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_id_is_not_found() {
    let mut conn = connect().await;
    let mut tx = conn.begin().await.unwrap();
    ensure_schema(&mut tx).await.unwrap();

    let mut repo = StudentRepo::new(&mut tx);
    let missing = StudentId::new(i32::MAX).unwrap();
    let err = repo
        .update_email(missing, &Email::new("new@x.com").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, StudentError::NotFound { id } if id == i32::MAX));

    drop(repo);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_removes_from_list() {
    let mut conn = connect().await;
    let mut tx = conn.begin().await.unwrap();
    ensure_schema(&mut tx).await.unwrap();

    let email = unique_email("gone");
    let mut repo = StudentRepo::new(&mut tx);
    let id = repo.insert(&alice(&email)).await.unwrap();

    let removed = repo.delete(id).await.unwrap();
    assert_eq!(removed.student_id, id.get());
    assert_eq!(removed.email, email);

    let still_there = repo
        .list_all()
        .await
        .unwrap()
        .iter()
        .any(|s| s.student_id == id.get());
    assert!(!still_there);

    let err = repo.delete(id).await.unwrap_err();
    assert!(matches!(err, StudentError::NotFound { .. }));

    drop(repo);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn insert_without_enrollment_date() {
    let mut conn = connect().await;
    let mut tx = conn.begin().await.unwrap();
    ensure_schema(&mut tx).await.unwrap();

    let student = NewStudent::parse("Bob", "Smith", &unique_email("bob"), "").unwrap();
    let mut repo = StudentRepo::new(&mut tx);
    let id = repo.insert(&student).await.unwrap();

    let row = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.student_id == id.get())
        .unwrap();
    assert_eq!(row.enrollment_date, None);

    drop(repo);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn terminated_backend_is_connection_error() {
    let mut victim = connect().await;
    let (pid,): (i32,) = sqlx::query_as("SELECT pg_backend_pid()")
        .fetch_one(&mut victim)
        .await
        .unwrap();

    let mut admin = connect().await;
    let (terminated,): (bool,) = sqlx::query_as("SELECT pg_terminate_backend($1)")
        .bind(pid)
        .fetch_one(&mut admin)
        .await
        .unwrap();
    assert!(terminated);

    // Give the backend time to send its FATAL 57P01 before the next query
    std::thread::sleep(std::time::Duration::from_millis(200));

    let mut repo = StudentRepo::new(&mut victim);
    for attempt in 0..3 {
        let err = repo.list_all().await.unwrap_err();
        assert!(err.is_connection(), "attempt {attempt}: {err:?}");
    }
}
