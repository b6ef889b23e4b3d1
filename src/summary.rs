//! # Update Summary
//!
//! Thread-safe aggregation of per-repository update outcomes. A single
//! [`UpdateSummary`] is created per batch run, shared by every update worker,
//! and read by the caller once all workers have completed.
//!
//! Both collections are guarded by a mutex so that workers running on
//! different threads can record outcomes concurrently. Failures are keyed by
//! repository name; successes preserve their append order (which is
//! nondeterministic across workers). The dispatch design guarantees each
//! repository name is processed at most once, so no validation is performed
//! here: after a full run, the failure and success name-sets are disjoint
//! and together cover exactly the submitted repositories.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Error;

/// Collector for per-repository update outcomes.
///
/// Created empty at batch start, mutated concurrently during dispatch, and
/// read-only once every worker has joined.
#[derive(Debug, Default)]
pub struct UpdateSummary {
    /// Repositories that failed to update, with the error each one surfaced.
    failures: Mutex<HashMap<String, Error>>,
    /// Repositories that updated successfully, in completion order.
    successes: Mutex<Vec<String>>,
}

impl UpdateSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failed update for `repository`, keeping `cause` verbatim.
    ///
    /// A later call for the same name overwrites the earlier entry, although
    /// deduplication upstream guarantees that never happens in practice.
    pub fn record_failure(&self, repository: &str, cause: Error) {
        self.failures
            .lock()
            .unwrap()
            .insert(repository.to_string(), cause);
    }

    /// Records a successful update for `repository`.
    pub fn record_success(&self, repository: &str) {
        self.successes.lock().unwrap().push(repository.to_string());
    }

    /// Returns the rendered cause recorded for `repository`, if any.
    pub fn failure(&self, repository: &str) -> Option<String> {
        self.failures
            .lock()
            .unwrap()
            .get(repository)
            .map(|e| e.to_string())
    }

    /// Returns a snapshot of all recorded failures as repository -> rendered
    /// cause.
    pub fn failures(&self) -> HashMap<String, String> {
        self.failures
            .lock()
            .unwrap()
            .iter()
            .map(|(repository, cause)| (repository.clone(), cause.to_string()))
            .collect()
    }

    /// Returns a snapshot of all successfully updated repositories, in the
    /// order their updates completed.
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    /// Number of failed updates.
    pub fn failure_count(&self) -> usize {
        self.failures.lock().unwrap().len()
    }

    /// Number of successful updates.
    pub fn success_count(&self) -> usize {
        self.successes.lock().unwrap().len()
    }

    /// True if at least one update failed.
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }
}
