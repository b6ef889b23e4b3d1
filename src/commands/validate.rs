//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks every
//! repository policy configuration file without applying anything.
//!
//! ## Functionality
//!
//! - **Per-file validation**: parses each YAML file, checks the required
//!   fields, and validates the referenced policy document is well-formed
//!   JSON. Unlike `apply`, validation continues past the first broken file
//!   so every problem is reported in one pass.
//! - **Duplicate detection**: checks that no two files declare the same
//!   repository name.
//!
//! This command is a safe, read-only operation that never contacts the
//! registry.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use ecr_policy::config;
use ecr_policy::defaults;
use ecr_policy::output::{emoji, OutputConfig};
use ecr_policy::updater;

/// Validate the repository policy configuration files
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Directory containing the repository policy configuration files
    #[arg(short, long, value_name = "DIR", env = "CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

/// Execute the `validate` command.
///
/// Validates every configuration file under the configuration directory and
/// reports per-file results, then checks the batch for duplicate repository
/// names. Returns an error if any file is invalid or any name is duplicated.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config_dir = args.config_dir.unwrap_or_else(defaults::default_config_dir);

    println!(
        "{} Validating configuration directory: {}",
        emoji(&out, "🔍", "[SCAN]"),
        config_dir.display()
    );

    if !config_dir.is_dir() {
        anyhow::bail!(
            "Configuration directory not found: {}",
            config_dir.display()
        );
    }

    let files = config::discover_config_files(&config_dir)?;
    println!("   Found {} configuration files", files.len());

    let mut configs = Vec::new();
    let mut has_errors = false;

    for path in &files {
        match config::from_file(path) {
            Ok(config) => {
                println!(
                    "{} {} -> repository {}",
                    emoji(&out, "✅", "[OK]"),
                    path.display(),
                    config.repository
                );
                configs.push(config);
            }
            Err(e) => {
                println!("{} {}: {}", emoji(&out, "❌", "[ERR]"), path.display(), e);
                has_errors = true;
            }
        }
    }

    // Duplicate check only over the files that parsed
    if let Err(e) = updater::check_duplicates(&configs) {
        println!("{} {}", emoji(&out, "❌", "[ERR]"), e);
        has_errors = true;
    }

    if has_errors {
        anyhow::bail!("Configuration validation failed");
    }

    println!(
        "{} All configuration files are valid",
        emoji(&out, "✅", "[OK]")
    );
    Ok(())
}
