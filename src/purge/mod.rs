//! Retention purge engine for execution history.
//!
//! Given a cutoff timestamp and an optional action-reference filter, the
//! engine selects executions that ended before the cutoff, deletes each one
//! together with its live-action record, and accounts for every partial
//! failure along the way:
//!
//! 1. Candidate selection is a coarse store-side query refined in memory.
//!    In-progress executions are never purged, regardless of age.
//! 2. Candidates are purged independently and sequentially: the execution
//!    is deleted first, then its live action. A failure on one candidate
//!    never aborts the batch; only a failure of the selection query does.
//! 3. The run result distinguishes live actions that were already missing
//!    before the run from zombies left behind by a failed cascade delete.

mod criteria;
mod engine;

pub use criteria::PurgeCriteria;
pub use engine::{LiveActionLookup, PurgeEngine, PurgeOutcome, PurgeRunResult};
