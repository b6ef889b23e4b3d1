//! # Policy Update Engine
//!
//! The concurrent heart of `ecr-policy`. Given a batch of validated
//! [`PolicyConfig`] entries, the [`PolicyUpdater`]:
//!
//! 1. Rejects the whole batch if two entries share a repository name. A
//!    duplicate is a fatal configuration error and nothing is dispatched.
//! 2. Fans out one update per entry across the rayon thread pool, with no
//!    concurrency cap: batch sizes are expected to be small enough that one
//!    task per repository is acceptable.
//! 3. Joins all workers and returns the populated [`UpdateSummary`].
//!
//! Each worker invokes the injected [`RegistryOps`] and records its outcome
//! in the shared summary. A remote failure is always captured as data, never
//! propagated: one repository's failure cannot abort or affect any other
//! repository's update. `par_iter().for_each` provides the join barrier, so
//! no partial results are visible before every worker has terminated.
//!
//! Dry-run is a caller decision, not an engine one: callers wanting a dry
//! run perform the same loading and duplicate checking but never call
//! [`PolicyUpdater::run`].

use std::collections::HashSet;

use log::{error, info};
use rayon::prelude::*;

use crate::config::PolicyConfig;
use crate::error::{Error, Result};
use crate::registry::{AwsCliRegistryOps, RegistryOps};
use crate::summary::UpdateSummary;

/// Checks the batch for duplicate repository names.
///
/// Returns the fatal [`Error::DuplicateRepository`] for the first repeated
/// name, naming the configuration file the duplicate came from.
pub fn check_duplicates(configs: &[PolicyConfig]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for config in configs {
        if !seen.insert(config.repository.as_str()) {
            return Err(Error::DuplicateRepository {
                repository: config.repository.clone(),
                path: config.source.display().to_string(),
            });
        }
    }
    Ok(())
}

/// Dispatches repository policy updates against an injected registry client.
pub struct PolicyUpdater {
    registry_ops: Box<dyn RegistryOps>,
}

impl Default for PolicyUpdater {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyUpdater {
    /// Creates a `PolicyUpdater` backed by the system `aws` command.
    pub fn new() -> Self {
        Self {
            registry_ops: Box::new(AwsCliRegistryOps),
        }
    }

    /// Creates a `PolicyUpdater` with a custom `RegistryOps` implementation.
    ///
    /// This is primarily used for testing to inject mock registries.
    pub fn with_operations(registry_ops: Box<dyn RegistryOps>) -> Self {
        Self { registry_ops }
    }

    /// Applies every configuration in the batch, one worker per repository.
    ///
    /// Aborts before any dispatch if the batch contains a duplicate
    /// repository name. Otherwise all updates run to completion and the
    /// returned summary accounts for every submitted repository, split into
    /// successes and failures. An empty batch returns an empty summary.
    pub fn run(&self, configs: &[PolicyConfig]) -> Result<UpdateSummary> {
        check_duplicates(configs)?;

        let summary = UpdateSummary::new();
        configs
            .par_iter()
            .for_each(|config| self.apply_one(config, &summary));

        Ok(summary)
    }

    /// Applies one repository policy and records the outcome.
    fn apply_one(&self, config: &PolicyConfig, summary: &UpdateSummary) {
        info!("Updating repository {} ...", config.repository);

        match self
            .registry_ops
            .set_repository_policy(&config.repository, &config.policy)
        {
            Ok(()) => {
                info!("Policy updated for repository {}", config.repository);
                summary.record_success(&config.repository);
            }
            Err(e) => {
                error!(
                    "An error occurred while updating the repository {}: \"{}\"",
                    config.repository, e
                );
                summary.record_failure(&config.repository, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Mock registry operations for testing
    struct MockRegistryOps {
        calls: Arc<Mutex<Vec<(String, String)>>>,
        fail_repositories: HashSet<String>,
        error_message: String,
    }

    impl MockRegistryOps {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_repositories: HashSet::new(),
                error_message: String::new(),
            }
        }

        fn failing_for(repositories: &[&str], message: &str) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_repositories: repositories.iter().map(|r| r.to_string()).collect(),
                error_message: message.to_string(),
            }
        }
    }

    impl RegistryOps for MockRegistryOps {
        fn set_repository_policy(&self, repository: &str, policy: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((repository.to_string(), policy.to_string()));
            if self.fail_repositories.contains(repository) {
                Err(Error::Registry {
                    repository: repository.to_string(),
                    message: self.error_message.clone(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn config(repository: &str, policy: &str) -> PolicyConfig {
        PolicyConfig {
            repository: repository.to_string(),
            policy_file: PathBuf::from(format!("{}.json", repository)),
            policy: policy.to_string(),
            source: PathBuf::from(format!("{}.yaml", repository)),
        }
    }

    #[test]
    fn test_check_duplicates_unique_names() {
        let configs = vec![config("foo", "{}"), config("bar", "{}")];
        assert!(check_duplicates(&configs).is_ok());
    }

    #[test]
    fn test_check_duplicates_rejects_repeated_name() {
        let configs = vec![config("foo", "{\"a\":1}"), config("foo", "{\"a\":2}")];
        let err = check_duplicates(&configs).unwrap_err();
        assert!(matches!(err, Error::DuplicateRepository { .. }));
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_run_all_successful() {
        let registry_ops = Box::new(MockRegistryOps::new());
        let calls = registry_ops.calls.clone();
        let updater = PolicyUpdater::with_operations(registry_ops);

        let configs = vec![config("foo", "{}"), config("bar", "{}")];
        let summary = updater.run(&configs).unwrap();

        assert_eq!(summary.success_count(), 2);
        assert_eq!(summary.failure_count(), 0);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_run_mixed_success_and_failure() {
        let registry_ops = Box::new(MockRegistryOps::failing_for(&["bar"], "AccessDenied"));
        let updater = PolicyUpdater::with_operations(registry_ops);

        let configs = vec![config("foo", "{\"a\":1}"), config("bar", "{\"b\":2}")];
        let summary = updater.run(&configs).unwrap();

        assert_eq!(summary.successes(), vec!["foo"]);
        assert_eq!(summary.failure_count(), 1);
        assert!(summary.failure("bar").unwrap().contains("AccessDenied"));
        assert!(summary.failure("foo").is_none());
    }

    #[test]
    fn test_run_worker_receives_policy_verbatim() {
        let registry_ops = Box::new(MockRegistryOps::new());
        let calls = registry_ops.calls.clone();
        let updater = PolicyUpdater::with_operations(registry_ops);

        let configs = vec![config("foo", "{\"Version\":\"2008-10-17\"}")];
        updater.run(&configs).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].0, "foo");
        assert_eq!(calls[0].1, "{\"Version\":\"2008-10-17\"}");
    }

    #[test]
    fn test_run_duplicate_aborts_before_dispatch() {
        let registry_ops = Box::new(MockRegistryOps::new());
        let calls = registry_ops.calls.clone();
        let updater = PolicyUpdater::with_operations(registry_ops);

        let configs = vec![config("foo", "{\"a\":1}"), config("foo", "{\"a\":2}")];
        let result = updater.run(&configs);

        assert!(matches!(result, Err(Error::DuplicateRepository { .. })));
        // No worker was dispatched.
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_run_empty_batch() {
        let registry_ops = Box::new(MockRegistryOps::new());
        let calls = registry_ops.calls.clone();
        let updater = PolicyUpdater::with_operations(registry_ops);

        let summary = updater.run(&[]).unwrap();

        assert_eq!(summary.success_count(), 0);
        assert_eq!(summary.failure_count(), 0);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_run_summary_covers_all_repositories() {
        let failing: Vec<String> = (0..20)
            .filter(|i| i % 3 == 0)
            .map(|i| format!("repo{}", i))
            .collect();
        let failing_refs: Vec<&str> = failing.iter().map(|s| s.as_str()).collect();
        let registry_ops = Box::new(MockRegistryOps::failing_for(&failing_refs, "throttled"));
        let updater = PolicyUpdater::with_operations(registry_ops);

        let configs: Vec<PolicyConfig> = (0..20)
            .map(|i| config(&format!("repo{}", i), "{}"))
            .collect();
        let summary = updater.run(&configs).unwrap();

        assert_eq!(summary.success_count() + summary.failure_count(), 20);

        let successes: HashSet<String> = summary.successes().into_iter().collect();
        let failures = summary.failures();
        for config in &configs {
            let succeeded = successes.contains(&config.repository);
            let failed = failures.contains_key(&config.repository);
            assert!(succeeded != failed, "{} must be in exactly one set", config.repository);
        }
    }

    #[test]
    fn test_independent_runs_do_not_cross_talk() {
        let ops_a = Box::new(MockRegistryOps::new());
        let ops_b = Box::new(MockRegistryOps::failing_for(&["b1", "b2"], "boom"));
        let updater_a = PolicyUpdater::with_operations(ops_a);
        let updater_b = PolicyUpdater::with_operations(ops_b);

        let configs_a = vec![config("a1", "{}"), config("a2", "{}")];
        let configs_b = vec![config("b1", "{}"), config("b2", "{}")];

        let (summary_a, summary_b) = std::thread::scope(|scope| {
            let handle_a = scope.spawn(|| updater_a.run(&configs_a).unwrap());
            let handle_b = scope.spawn(|| updater_b.run(&configs_b).unwrap());
            (handle_a.join().unwrap(), handle_b.join().unwrap())
        });

        assert_eq!(summary_a.success_count(), 2);
        assert_eq!(summary_a.failure_count(), 0);
        assert_eq!(summary_b.success_count(), 0);
        assert_eq!(summary_b.failure_count(), 2);
    }
}
