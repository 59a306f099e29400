use std::sync::Arc;

use crate::{
    db::{DbPool, DbResult, ExecutionRepo, LiveActionRepo},
    models::{Execution, LiveAction},
    purge::PurgeCriteria,
};

/// Counters accumulated over a single purge run.
///
/// Owned by the engine caller, never persisted. `live_actions_missing` and
/// `zombies_left` are deliberately separate: a missing live action was
/// already gone before the run, while a zombie is one the run itself
/// unhooked from its execution and then failed to delete.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PurgeRunResult {
    /// Eligible executions found by the selection pass.
    pub candidates: u64,
    /// Executions deleted.
    pub executions_deleted: u64,
    /// Live actions deleted.
    pub live_actions_deleted: u64,
    /// Candidates whose live action was absent or unresolvable before deletion.
    pub live_actions_missing: u64,
    /// Live actions left behind after their execution was deleted.
    pub zombies_left: u64,
}

impl PurgeRunResult {
    /// Total number of records removed from the store.
    pub fn total_deleted(&self) -> u64 {
        self.executions_deleted + self.live_actions_deleted
    }

    /// Check if any records were deleted.
    pub fn has_deletions(&self) -> bool {
        self.total_deleted() > 0
    }
}

/// Outcome of purging a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// Execution deleted, along with its live action when one was resolved.
    FullyDeleted,
    /// Execution deleted but the live action delete failed; a zombie remains.
    ExecutionDeletedLiveActionOrphaned,
    /// Execution delete failed; its live action was left untouched.
    ExecutionDeleteFailed,
}

/// Result of resolving a candidate's live action before deletion.
#[derive(Debug)]
pub enum LiveActionLookup {
    /// Live action found and due for cascade deletion.
    Found(LiveAction),
    /// The execution carries no live action reference at all.
    MissingReference,
    /// The reference points at a live action that no longer exists.
    NotFound,
}

/// Purge engine for execution history.
///
/// Operates on the repository traits so tests can substitute in-memory or
/// failure-injecting implementations.
pub struct PurgeEngine {
    executions: Arc<dyn ExecutionRepo>,
    live_actions: Arc<dyn LiveActionRepo>,
}

impl PurgeEngine {
    pub fn new(executions: Arc<dyn ExecutionRepo>, live_actions: Arc<dyn LiveActionRepo>) -> Self {
        Self {
            executions,
            live_actions,
        }
    }

    pub fn from_pool(db: &DbPool) -> Self {
        Self::new(db.executions(), db.live_actions())
    }

    /// Select the executions eligible for purging under the given criteria.
    ///
    /// Candidates are materialized before any deletion begins; iterating a
    /// live query while deleting from the same table is not safe.
    pub async fn select_candidates(&self, criteria: &PurgeCriteria) -> DbResult<Vec<Execution>> {
        let ended_before = self.executions.list_ended_before(criteria.cutoff).await?;

        Ok(ended_before
            .into_iter()
            .filter(|execution| criteria.matches(execution))
            .collect())
    }

    /// Run a purge: select candidates, then delete each one in turn.
    ///
    /// Only a failure of the selection query aborts the run. Per-candidate
    /// failures are logged, counted, and do not stop the batch.
    pub async fn run(&self, criteria: &PurgeCriteria) -> DbResult<PurgeRunResult> {
        tracing::info!(
            cutoff = %criteria.cutoff,
            action_ref = criteria.action_ref.as_deref().unwrap_or("<all>"),
            "Purging executions that ended before the cutoff"
        );

        let candidates = self.select_candidates(criteria).await?;

        let mut result = PurgeRunResult {
            candidates: candidates.len() as u64,
            ..Default::default()
        };

        tracing::info!(candidates = result.candidates, "Selected purge candidates");

        for execution in &candidates {
            self.purge_one(execution, &mut result).await;
        }

        Ok(result)
    }

    /// Select and report candidates without deleting anything.
    pub async fn dry_run(&self, criteria: &PurgeCriteria) -> DbResult<PurgeRunResult> {
        let candidates = self.select_candidates(criteria).await?;

        for execution in &candidates {
            tracing::info!(
                execution_id = %execution.id,
                action_ref = %execution.action_ref,
                status = %execution.status,
                "DRY RUN: would purge execution"
            );
        }

        Ok(PurgeRunResult {
            candidates: candidates.len() as u64,
            ..Default::default()
        })
    }

    /// Purge a single candidate: the execution first, then its live action.
    ///
    /// The execution is the record the caller filters and counts by, so it
    /// goes first: a live action stranded by a failed second delete is
    /// inert, while an undeleted execution defeats the run. When the
    /// execution delete fails, its live action is left untouched so the
    /// still-present execution keeps a valid reference.
    pub async fn purge_one(
        &self,
        execution: &Execution,
        result: &mut PurgeRunResult,
    ) -> PurgeOutcome {
        let lookup = self.resolve_live_action(execution).await;
        if !matches!(lookup, LiveActionLookup::Found(_)) {
            result.live_actions_missing += 1;
        }

        if let Err(e) = self.executions.delete(execution.id).await {
            tracing::error!(
                execution_id = %execution.id,
                error = %e,
                "Failed to delete execution, leaving its live action in place"
            );
            return PurgeOutcome::ExecutionDeleteFailed;
        }
        result.executions_deleted += 1;

        let live_action = match lookup {
            LiveActionLookup::Found(live_action) => live_action,
            LiveActionLookup::MissingReference | LiveActionLookup::NotFound => {
                return PurgeOutcome::FullyDeleted;
            }
        };

        match self.live_actions.delete(live_action.id).await {
            Ok(()) => {
                result.live_actions_deleted += 1;
                PurgeOutcome::FullyDeleted
            }
            Err(e) => {
                tracing::error!(
                    live_action_id = %live_action.id,
                    execution_id = %execution.id,
                    error = %e,
                    "Zombie live action left in store"
                );
                result.zombies_left += 1;
                PurgeOutcome::ExecutionDeletedLiveActionOrphaned
            }
        }
    }

    /// Resolve the live action referenced by a candidate.
    ///
    /// Both absence shapes are tolerated: an execution with no reference is
    /// a structural error, and a dangling reference is a leftover from a
    /// prior partial failure. Neither blocks deletion of the execution.
    pub async fn resolve_live_action(&self, execution: &Execution) -> LiveActionLookup {
        let Some(live_action_id) = execution.live_action_id else {
            tracing::error!(
                execution_id = %execution.id,
                "Execution has no live action reference, skipping live action delete"
            );
            return LiveActionLookup::MissingReference;
        };

        match self.live_actions.get_by_id(live_action_id).await {
            Ok(Some(live_action)) => LiveActionLookup::Found(live_action),
            Ok(None) => {
                tracing::error!(
                    execution_id = %execution.id,
                    live_action_id = %live_action_id,
                    "Live action not found, skipping live action delete"
                );
                LiveActionLookup::NotFound
            }
            Err(e) => {
                tracing::error!(
                    execution_id = %execution.id,
                    live_action_id = %live_action_id,
                    error = %e,
                    "Live action lookup failed, skipping live action delete"
                );
                LiveActionLookup::NotFound
            }
        }
    }
}
