//! Tests for the SQLite LiveActionRepo implementation

use uuid::Uuid;

use super::harness::migrated_pool;
use crate::{
    db::{DbError, repos::LiveActionRepo, sqlite::SqliteLiveActionRepo},
    models::{ExecutionStatus, NewLiveAction},
};

fn new_live_action(action_ref: &str, status: ExecutionStatus) -> NewLiveAction {
    NewLiveAction {
        action_ref: action_ref.to_string(),
        status,
    }
}

#[tokio::test]
async fn test_create_and_get_round_trip() {
    let pool = migrated_pool().await;
    let repo = SqliteLiveActionRepo::new(pool);

    let created = repo
        .create(new_live_action("core.remote", ExecutionStatus::Succeeded))
        .await
        .unwrap();

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.action_ref, "core.remote");
    assert_eq!(fetched.status, ExecutionStatus::Succeeded);
}

#[tokio::test]
async fn test_get_by_id_missing_returns_none() {
    let pool = migrated_pool().await;
    let repo = SqliteLiveActionRepo::new(pool);

    assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_removes_row() {
    let pool = migrated_pool().await;
    let repo = SqliteLiveActionRepo::new(pool);

    let created = repo
        .create(new_live_action("core.local", ExecutionStatus::Failed))
        .await
        .unwrap();

    repo.delete(created.id).await.unwrap();
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_missing_returns_not_found() {
    let pool = migrated_pool().await;
    let repo = SqliteLiveActionRepo::new(pool);

    let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound));
}
