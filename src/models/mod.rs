mod execution;
mod live_action;

pub use execution::{Execution, ExecutionStatus, NewExecution};
pub use live_action::{LiveAction, NewLiveAction};
