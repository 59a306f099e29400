use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ExecutionStatus;

/// The runtime record backing an execution.
///
/// Referenced by at most one execution, by id only. The execution is the
/// system of record for history; a live action without an owning execution
/// is inert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveAction {
    /// Unique identifier for this live action
    pub id: Uuid,
    /// Reference of the action being run
    pub action_ref: String,
    /// Status aligned with the owning execution
    pub status: ExecutionStatus,
}

/// Input for recording a new live action
#[derive(Debug, Clone)]
pub struct NewLiveAction {
    pub action_ref: String,
    pub status: ExecutionStatus,
}
