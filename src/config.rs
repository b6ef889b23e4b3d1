//! # Configuration Schema and Loading
//!
//! This module defines the data structure representing one repository policy
//! configuration file, as well as the logic for discovering and loading the
//! full set of configuration files.
//!
//! ## File format
//!
//! Each configuration file is a small YAML document with exactly two fields:
//!
//! ```yaml
//! repositoryName: backend/api
//! repositoryPolicyFile: files/policies/backend-api.json
//! ```
//!
//! `repositoryName` is the registry repository to update and
//! `repositoryPolicyFile` points at the JSON policy document to push to it.
//! Parsing is strict: unknown keys are rejected, both fields must be present
//! and non-empty, and the referenced policy file must contain well-formed
//! JSON. The policy content is kept verbatim; only its syntax is checked.
//!
//! ## Discovery
//!
//! [`discover_config_files`] walks a configuration directory recursively and
//! collects every `.yaml` / `.yml` file. [`load_dir`] combines discovery and
//! loading, aborting on the first invalid file: a broken configuration is a
//! fatal error for the whole batch, never silently skipped.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// One validated repository policy configuration.
///
/// Immutable once loaded; workers only ever borrow it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// The registry repository this policy applies to.
    #[serde(rename = "repositoryName")]
    pub repository: String,

    /// Path to the JSON policy document, as written in the configuration
    /// file (resolved relative to the working directory).
    #[serde(rename = "repositoryPolicyFile")]
    pub policy_file: PathBuf,

    /// The raw policy document loaded from `policy_file`.
    #[serde(skip)]
    pub policy: String,

    /// The configuration file this entry was loaded from.
    #[serde(skip)]
    pub source: PathBuf,
}

/// Recursively collect all YAML configuration files under `root`.
///
/// Only files ending in `.yaml` or `.yml` are accepted. Results are sorted
/// so discovery order is deterministic across platforms.
pub fn discover_config_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file()
            && matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            )
        {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Load and validate a single configuration file.
///
/// Parses the YAML strictly, checks both fields are non-empty, then reads
/// the referenced policy file and validates it is well-formed JSON.
pub fn from_file(path: &Path) -> Result<PolicyConfig> {
    debug!("{} - reading configuration file", path.display());
    let contents = fs::read_to_string(path)?;

    debug!("{} - parsing", path.display());
    let mut config: PolicyConfig =
        serde_yaml::from_str(&contents).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    if config.repository.is_empty() {
        return Err(Error::ConfigParse {
            path: path.display().to_string(),
            message: "repositoryName must be present and not empty".to_string(),
        });
    }
    if config.policy_file.as_os_str().is_empty() {
        return Err(Error::ConfigParse {
            path: path.display().to_string(),
            message: "repositoryPolicyFile must be present and not empty".to_string(),
        });
    }

    debug!(
        "{} - validating policy document {}",
        path.display(),
        config.policy_file.display()
    );
    let policy = fs::read_to_string(&config.policy_file).map_err(|e| Error::PolicyParse {
        path: config.policy_file.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str::<serde_json::Value>(&policy).map_err(|e| Error::PolicyParse {
        path: config.policy_file.display().to_string(),
        message: format!("not a valid JSON document: {}", e),
    })?;

    config.policy = policy;
    config.source = path.to_path_buf();
    Ok(config)
}

/// Discover and load every configuration file under `root`.
///
/// The first invalid file aborts the whole load.
pub fn load_dir(root: &Path) -> Result<Vec<PolicyConfig>> {
    let mut configs = Vec::new();
    for path in discover_config_files(root)? {
        configs.push(from_file(&path)?);
    }
    Ok(configs)
}
