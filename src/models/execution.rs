use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Accepted but not yet scheduled
    Requested,
    /// Picked up by the scheduler
    Scheduled,
    /// Held back by a policy delay
    Delayed,
    /// Actively executing
    Running,
    /// Cancel requested, still winding down
    Canceling,
    /// Finished successfully
    Succeeded,
    /// Finished with an error
    Failed,
    /// Killed after exceeding its timeout
    TimedOut,
    /// Cancel completed
    Canceled,
}

impl ExecutionStatus {
    /// Whether the execution may still be actively writing to the store.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Requested
                | ExecutionStatus::Scheduled
                | ExecutionStatus::Delayed
                | ExecutionStatus::Running
                | ExecutionStatus::Canceling
        )
    }

    /// Whether the execution has reached a final state.
    pub fn is_terminal(&self) -> bool {
        !self.is_in_progress()
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Requested => write!(f, "requested"),
            ExecutionStatus::Scheduled => write!(f, "scheduled"),
            ExecutionStatus::Delayed => write!(f, "delayed"),
            ExecutionStatus::Running => write!(f, "running"),
            ExecutionStatus::Canceling => write!(f, "canceling"),
            ExecutionStatus::Succeeded => write!(f, "succeeded"),
            ExecutionStatus::Failed => write!(f, "failed"),
            ExecutionStatus::TimedOut => write!(f, "timed_out"),
            ExecutionStatus::Canceled => write!(f, "canceled"),
        }
    }
}

impl std::str::FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(ExecutionStatus::Requested),
            "scheduled" => Ok(ExecutionStatus::Scheduled),
            "delayed" => Ok(ExecutionStatus::Delayed),
            "running" => Ok(ExecutionStatus::Running),
            "canceling" => Ok(ExecutionStatus::Canceling),
            "succeeded" => Ok(ExecutionStatus::Succeeded),
            "failed" => Ok(ExecutionStatus::Failed),
            "timed_out" => Ok(ExecutionStatus::TimedOut),
            "canceled" => Ok(ExecutionStatus::Canceled),
            _ => Err(format!("Invalid execution status: {}", s)),
        }
    }
}

/// A historical execution record, one per action run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    /// Unique identifier for this execution
    pub id: Uuid,
    /// Reference of the action that produced this execution (e.g. "core.local")
    pub action_ref: String,
    /// Current lifecycle status
    pub status: ExecutionStatus,
    /// When the execution started
    pub start_timestamp: DateTime<Utc>,
    /// When the execution reached a terminal state (None while in progress)
    pub end_timestamp: Option<DateTime<Utc>>,
    /// Back-reference to the live action that ran this execution.
    /// May be absent when a prior partial failure left the record without one.
    pub live_action_id: Option<Uuid>,
}

/// Input for recording a new execution
#[derive(Debug, Clone)]
pub struct NewExecution {
    pub action_ref: String,
    pub status: ExecutionStatus,
    pub start_timestamp: DateTime<Utc>,
    pub end_timestamp: Option<DateTime<Utc>>,
    pub live_action_id: Option<Uuid>,
}
