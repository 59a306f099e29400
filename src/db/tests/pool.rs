//! Tests for DbPool construction against file-backed databases

use tempfile::tempdir;

use crate::{
    config::DatabaseConfig,
    db::{DbPool, ExecutionRepo, LiveActionRepo},
};

#[tokio::test]
async fn test_connect_creates_and_migrates_database() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.db");

    let config = DatabaseConfig {
        path: path.to_string_lossy().into_owned(),
        ..Default::default()
    };

    let db = DbPool::connect(&config).await.unwrap();
    assert_eq!(db.executions().count().await.unwrap(), 0);
    assert_eq!(db.live_actions().count().await.unwrap(), 0);
    db.close().await;

    assert!(path.exists());
}

#[tokio::test]
async fn test_connect_without_create_if_missing_fails_on_absent_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.db");

    let config = DatabaseConfig {
        path: path.to_string_lossy().into_owned(),
        create_if_missing: false,
        ..Default::default()
    };

    assert!(DbPool::connect(&config).await.is_err());
}
