mod executions;
mod live_actions;

pub use executions::ExecutionRepo;
pub use live_actions::LiveActionRepo;
