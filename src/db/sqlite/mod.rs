mod common;
mod executions;
mod live_actions;

pub use executions::SqliteExecutionRepo;
pub use live_actions::SqliteLiveActionRepo;
