//! Deadline-bounded execution of CPU-bound work.
//!
//! Work runs on tokio's blocking pool and the caller awaits it under
//! `tokio::time::timeout`, so the caller gets an answer within the budget no
//! matter how long the work itself takes or how busy the pool is.

use std::time::{Duration, Instant};
use tracing::warn;

/// Result of running a stage under a deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    /// The work finished in time
    Completed(T),
    /// The budget elapsed first; the result, if any, is discarded
    TimedOut,
    /// The work panicked or was cancelled
    Aborted,
}

impl<T> StageOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::TimedOut | Self::Aborted => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut)
    }
}

/// Run `work` on the blocking pool and wait at most `budget` for it.
///
/// Requires a tokio runtime.
pub async fn run_bounded<T, F>(stage: &'static str, budget: Duration, work: F) -> StageOutcome<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let started = Instant::now();
    match tokio::time::timeout(budget, tokio::task::spawn_blocking(work)).await {
        // The timer rounds deadlines up to the next millisecond; a result
        // delivered at or past the budget is still late.
        Ok(Ok(_)) if started.elapsed() >= budget => {
            warn!(
                stage = stage,
                budget_ms = budget.as_millis() as u64,
                "Bounded stage finished after its time budget"
            );
            StageOutcome::TimedOut
        }
        Ok(Ok(value)) => StageOutcome::Completed(value),
        Ok(Err(e)) => {
            warn!(stage = stage, error = %e, "Bounded stage aborted");
            StageOutcome::Aborted
        }
        Err(_) => {
            warn!(
                stage = stage,
                budget_ms = budget.as_millis() as u64,
                "Bounded stage exceeded its time budget"
            );
            StageOutcome::TimedOut
        }
    }
}
