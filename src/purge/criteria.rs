use chrono::{DateTime, Utc};

use crate::models::Execution;

/// Selection criteria for a purge run.
#[derive(Debug, Clone)]
pub struct PurgeCriteria {
    /// Exclusive upper bound on the end timestamp: only executions that
    /// ended strictly before this instant are candidates.
    pub cutoff: DateTime<Utc>,

    /// Restrict the run to a single action reference. None matches all.
    pub action_ref: Option<String>,
}

impl PurgeCriteria {
    pub fn new(cutoff: DateTime<Utc>) -> Self {
        Self {
            cutoff,
            action_ref: None,
        }
    }

    pub fn with_action_ref(mut self, action_ref: impl Into<String>) -> Self {
        self.action_ref = Some(action_ref.into());
        self
    }

    /// Full eligibility check for one execution.
    ///
    /// Applied in memory on top of the coarse store-side cutoff query. An
    /// in-progress execution is never eligible, even when its age exceeds
    /// the cutoff: it may still be actively writing.
    pub fn matches(&self, execution: &Execution) -> bool {
        if execution.status.is_in_progress() {
            return false;
        }

        match execution.end_timestamp {
            Some(end) if end < self.cutoff => {}
            _ => return false,
        }

        match &self.action_ref {
            Some(action_ref) => execution.action_ref == *action_ref,
            None => true,
        }
    }
}
