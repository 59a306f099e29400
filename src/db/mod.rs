mod error;
pub mod repos;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

use std::sync::Arc;

pub use error::{DbError, DbResult};
pub use repos::*;

use crate::config::DatabaseConfig;

/// Cached repository trait objects, created once at startup.
struct CachedRepos {
    executions: Arc<dyn ExecutionRepo>,
    live_actions: Arc<dyn LiveActionRepo>,
}

/// Database pool backed by SQLite.
///
/// Repositories are cached at construction time to avoid allocation on
/// each access.
pub struct DbPool {
    pool: sqlx::SqlitePool,
    repos: CachedRepos,
}

impl DbPool {
    /// Create a DbPool from an existing SQLite pool.
    /// Primarily useful for testing.
    pub fn from_sqlite(pool: sqlx::SqlitePool) -> Self {
        let repos = CachedRepos {
            executions: Arc::new(sqlite::SqliteExecutionRepo::new(pool.clone())),
            live_actions: Arc::new(sqlite::SqliteLiveActionRepo::new(pool.clone())),
        };
        DbPool { pool, repos }
    }

    /// Open the configured database, optionally running migrations.
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let options = sqlx::sqlite::SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(config.create_if_missing)
            .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms));

        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        if config.run_migrations {
            sqlx::migrate!("./migrations_sqlx/sqlite").run(&pool).await?;
        }

        Ok(Self::from_sqlite(pool))
    }

    pub fn executions(&self) -> Arc<dyn ExecutionRepo> {
        self.repos.executions.clone()
    }

    pub fn live_actions(&self) -> Arc<dyn LiveActionRepo> {
        self.repos.live_actions.clone()
    }

    /// Close the pool, releasing all connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
