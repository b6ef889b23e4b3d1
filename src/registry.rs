//! # Registry Operations
//!
//! This module defines the seam between the update engine and the remote
//! container registry. The engine only ever talks to the [`RegistryOps`]
//! trait; the concrete client is injected, which keeps the dispatch and
//! aggregation logic fully testable with mock registries.
//!
//! The default implementation, [`AwsCliRegistryOps`], wraps the system `aws`
//! command. Using the CLI rather than an embedded SDK client means
//! credentials are resolved exactly the way operators already configure
//! them: environment variables, shared config profiles, SSO sessions, or
//! instance roles.

use std::process::Command;

use crate::error::{Error, Result};

/// Trait for registry operations - allows mocking in tests
pub trait RegistryOps: Send + Sync {
    /// Applies `policy` (a JSON document) to the named repository.
    ///
    /// Any remote failure is surfaced as an opaque [`Error::Registry`]; the
    /// engine never inspects the cause and never retries.
    fn set_repository_policy(&self, repository: &str, policy: &str) -> Result<()>;
}

/// The default implementation of `RegistryOps`, which uses the system's
/// `aws` command to perform real ECR calls.
pub struct AwsCliRegistryOps;

impl RegistryOps for AwsCliRegistryOps {
    fn set_repository_policy(&self, repository: &str, policy: &str) -> Result<()> {
        // aws ecr set-repository-policy --repository-name <name> --policy-text <json>
        let output = Command::new("aws")
            .args([
                "ecr",
                "set-repository-policy",
                "--repository-name",
                repository,
                "--policy-text",
                policy,
            ])
            .output()
            .map_err(|e| Error::Registry {
                repository: repository.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Registry {
                repository: repository.to_string(),
                message: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}
