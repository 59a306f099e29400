//! Tests for the SQLite ExecutionRepo implementation

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::harness::migrated_pool;
use crate::{
    db::{DbError, repos::ExecutionRepo, sqlite::SqliteExecutionRepo},
    models::{ExecutionStatus, NewExecution},
};

fn new_execution(
    action_ref: &str,
    status: ExecutionStatus,
    end_timestamp: Option<DateTime<Utc>>,
    live_action_id: Option<Uuid>,
) -> NewExecution {
    NewExecution {
        action_ref: action_ref.to_string(),
        status,
        start_timestamp: Utc::now() - Duration::hours(1),
        end_timestamp,
        live_action_id,
    }
}

#[tokio::test]
async fn test_create_and_get_round_trip() {
    let pool = migrated_pool().await;
    let repo = SqliteExecutionRepo::new(pool);

    let live_action_id = Uuid::new_v4();
    let created = repo
        .create(new_execution(
            "core.local",
            ExecutionStatus::Succeeded,
            Some(Utc::now()),
            Some(live_action_id),
        ))
        .await
        .unwrap();

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.action_ref, "core.local");
    assert_eq!(fetched.status, ExecutionStatus::Succeeded);
    assert_eq!(fetched.live_action_id, Some(live_action_id));
    assert_eq!(fetched.end_timestamp, created.end_timestamp);
}

#[tokio::test]
async fn test_get_by_id_missing_returns_none() {
    let pool = migrated_pool().await;
    let repo = SqliteExecutionRepo::new(pool);

    let fetched = repo.get_by_id(Uuid::new_v4()).await.unwrap();
    assert!(fetched.is_none());
}

#[tokio::test]
async fn test_list_ended_before_filters_on_end_timestamp() {
    let pool = migrated_pool().await;
    let repo = SqliteExecutionRepo::new(pool);

    let cutoff = Utc::now();
    let old = repo
        .create(new_execution(
            "core.local",
            ExecutionStatus::Succeeded,
            Some(cutoff - Duration::days(2)),
            None,
        ))
        .await
        .unwrap();
    // Newer than the cutoff
    repo.create(new_execution(
        "core.local",
        ExecutionStatus::Succeeded,
        Some(cutoff + Duration::hours(1)),
        None,
    ))
    .await
    .unwrap();
    // Never ended
    repo.create(new_execution(
        "core.local",
        ExecutionStatus::Running,
        None,
        None,
    ))
    .await
    .unwrap();

    let listed = repo.list_ended_before(cutoff).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, old.id);
}

#[tokio::test]
async fn test_list_ended_before_cutoff_is_exclusive() {
    let pool = migrated_pool().await;
    let repo = SqliteExecutionRepo::new(pool);

    let cutoff = Utc::now();
    repo.create(new_execution(
        "core.local",
        ExecutionStatus::Succeeded,
        Some(cutoff),
        None,
    ))
    .await
    .unwrap();

    let listed = repo.list_ended_before(cutoff).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_delete_removes_row() {
    let pool = migrated_pool().await;
    let repo = SqliteExecutionRepo::new(pool);

    let created = repo
        .create(new_execution(
            "core.local",
            ExecutionStatus::Failed,
            Some(Utc::now()),
            None,
        ))
        .await
        .unwrap();

    repo.delete(created.id).await.unwrap();
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_missing_returns_not_found() {
    let pool = migrated_pool().await;
    let repo = SqliteExecutionRepo::new(pool);

    let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound));
}

#[tokio::test]
async fn test_count() {
    let pool = migrated_pool().await;
    let repo = SqliteExecutionRepo::new(pool);

    assert_eq!(repo.count().await.unwrap(), 0);
    for _ in 0..3 {
        repo.create(new_execution(
            "core.local",
            ExecutionStatus::Succeeded,
            Some(Utc::now()),
            None,
        ))
        .await
        .unwrap();
    }
    assert_eq!(repo.count().await.unwrap(), 3);
}
