//! Default values for ecr-policy configuration.
//!
//! Centralized defaults used across commands, ensuring consistency and
//! avoiding duplication.

use std::path::PathBuf;

/// Returns the default configuration directory.
///
/// This can be overridden by the `--config-dir` CLI flag or the
/// `CONFIG_DIR` environment variable.
pub fn default_config_dir() -> PathBuf {
    PathBuf::from("files")
}
