use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::error::DbResult,
    models::{LiveAction, NewLiveAction},
};

#[async_trait]
pub trait LiveActionRepo: Send + Sync {
    /// Record a new live action
    async fn create(&self, input: NewLiveAction) -> DbResult<LiveAction>;

    /// Get a live action by ID
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<LiveAction>>;

    /// Delete a live action by ID. Returns `DbError::NotFound` if no row
    /// was deleted.
    async fn delete(&self, id: Uuid) -> DbResult<()>;

    /// Count all live actions
    async fn count(&self) -> DbResult<i64>;
}
