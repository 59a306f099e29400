use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::error::DbResult,
    models::{Execution, NewExecution},
};

#[async_trait]
pub trait ExecutionRepo: Send + Sync {
    /// Record a new execution
    async fn create(&self, input: NewExecution) -> DbResult<Execution>;

    /// Get an execution by ID
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Execution>>;

    /// List executions whose end timestamp is strictly before the cutoff.
    ///
    /// This is the coarse store-side filter for purge candidate selection.
    /// Executions that have not ended never match.
    async fn list_ended_before(&self, cutoff: DateTime<Utc>) -> DbResult<Vec<Execution>>;

    /// Delete an execution by ID. Returns `DbError::NotFound` if no row
    /// was deleted.
    async fn delete(&self, id: Uuid) -> DbResult<()>;

    /// Count all executions
    async fn count(&self) -> DbResult<i64>;
}
