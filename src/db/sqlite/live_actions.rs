use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::common::parse_uuid;
use crate::{
    db::{
        error::{DbError, DbResult},
        repos::LiveActionRepo,
    },
    models::{ExecutionStatus, LiveAction, NewLiveAction},
};

pub struct SqliteLiveActionRepo {
    pool: SqlitePool,
}

impl SqliteLiveActionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_status(s: &str) -> DbResult<ExecutionStatus> {
        s.parse().map_err(DbError::Internal)
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> DbResult<LiveAction> {
        Ok(LiveAction {
            id: parse_uuid(&row.get::<String, _>("id"))?,
            action_ref: row.get("action_ref"),
            status: Self::parse_status(&row.get::<String, _>("status"))?,
        })
    }
}

#[async_trait]
impl LiveActionRepo for SqliteLiveActionRepo {
    async fn create(&self, input: NewLiveAction) -> DbResult<LiveAction> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO live_actions (id, action_ref, status)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&input.action_ref)
        .bind(input.status.to_string())
        .execute(&self.pool)
        .await?;

        Ok(LiveAction {
            id,
            action_ref: input.action_ref,
            status: input.status,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<LiveAction>> {
        let result = sqlx::query(
            r#"
            SELECT id, action_ref, status
            FROM live_actions
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Self::from_row(&row)).transpose()
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM live_actions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM live_actions")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }
}
