use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::common::parse_uuid;
use crate::{
    db::{
        error::{DbError, DbResult},
        repos::ExecutionRepo,
    },
    models::{Execution, ExecutionStatus, NewExecution},
};

pub struct SqliteExecutionRepo {
    pool: SqlitePool,
}

impl SqliteExecutionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_status(s: &str) -> DbResult<ExecutionStatus> {
        s.parse().map_err(DbError::Internal)
    }

    fn from_row(row: &sqlx::sqlite::SqliteRow) -> DbResult<Execution> {
        let live_action_id: Option<String> = row.get("live_action_id");

        Ok(Execution {
            id: parse_uuid(&row.get::<String, _>("id"))?,
            action_ref: row.get("action_ref"),
            status: Self::parse_status(&row.get::<String, _>("status"))?,
            start_timestamp: row.get("start_timestamp"),
            end_timestamp: row.get("end_timestamp"),
            live_action_id: live_action_id.map(|s| parse_uuid(&s)).transpose()?,
        })
    }
}

#[async_trait]
impl ExecutionRepo for SqliteExecutionRepo {
    async fn create(&self, input: NewExecution) -> DbResult<Execution> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO executions (
                id, action_ref, status, start_timestamp, end_timestamp, live_action_id
            )
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&input.action_ref)
        .bind(input.status.to_string())
        .bind(input.start_timestamp)
        .bind(input.end_timestamp)
        .bind(input.live_action_id.map(|id| id.to_string()))
        .execute(&self.pool)
        .await?;

        Ok(Execution {
            id,
            action_ref: input.action_ref,
            status: input.status,
            start_timestamp: input.start_timestamp,
            end_timestamp: input.end_timestamp,
            live_action_id: input.live_action_id,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Execution>> {
        let result = sqlx::query(
            r#"
            SELECT id, action_ref, status, start_timestamp, end_timestamp, live_action_id
            FROM executions
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Self::from_row(&row)).transpose()
    }

    async fn list_ended_before(&self, cutoff: DateTime<Utc>) -> DbResult<Vec<Execution>> {
        let rows = sqlx::query(
            r#"
            SELECT id, action_ref, status, start_timestamp, end_timestamp, live_action_id
            FROM executions
            WHERE end_timestamp IS NOT NULL AND end_timestamp < ?
            ORDER BY end_timestamp
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM executions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM executions")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }
}
