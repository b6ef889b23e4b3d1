//! # Apply Command Implementation
//!
//! The apply command executes the full pipeline:
//! 1. Discover and load every YAML configuration file under the
//!    configuration directory (fatal on the first invalid file).
//! 2. Check the batch for duplicate repository names (fatal, nothing is
//!    dispatched).
//! 3. Dispatch one policy update per repository in parallel and wait for
//!    all of them.
//! 4. Print a summary of successful and failed updates, and exit non-zero
//!    if any update failed.
//!
//! In dry-run mode steps 1-2 still run, but the update engine is never
//! invoked and the failure-driven exit-code logic is skipped: a dry run
//! succeeds exactly when every configuration file is valid and unique.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use log::info;

use ecr_policy::config;
use ecr_policy::defaults;
use ecr_policy::output::{emoji, OutputConfig};
use ecr_policy::updater::{self, PolicyUpdater};

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Directory containing the repository policy configuration files
    #[arg(short, long, value_name = "DIR", env = "CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Validate and deduplicate the configuration without updating anything
    #[arg(short = 'n', long, env = "DRY_RUN")]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the apply command
pub fn execute(args: ApplyArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config_dir = args.config_dir.unwrap_or_else(defaults::default_config_dir);

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    info!("Configuration directory is set to {}", config_dir.display());
    info!("Running in dry-run mode: {}", args.dry_run);

    if !config_dir.is_dir() {
        anyhow::bail!(
            "Configuration directory not found: {}",
            config_dir.display()
        );
    }

    // Any invalid configuration file aborts the whole batch
    let configs = config::load_dir(&config_dir)?;

    // Duplicate repository names are a fatal configuration error, checked
    // here as well so a dry run catches them without touching the engine
    updater::check_duplicates(&configs)?;

    if args.dry_run {
        if !args.quiet {
            println!(
                "{} Dry-run completed, all {} configuration files are valid",
                emoji(&out, "✅", "[OK]"),
                configs.len()
            );
        }
        return Ok(());
    }

    let updater = PolicyUpdater::new();
    let summary = updater.run(&configs)?;

    if !args.quiet {
        println!();
        println!("Repository update completed. Summary:");
        println!(
            "  {} Successful repository updates: {}",
            emoji(&out, "✅", "[OK]"),
            summary.success_count()
        );
        for repository in summary.successes() {
            println!("    - {}", repository);
        }
        println!(
            "  {} Failed repository updates: {}",
            emoji(&out, "❌", "[ERR]"),
            summary.failure_count()
        );
        let mut failures: Vec<(String, String)> = summary.failures().into_iter().collect();
        failures.sort();
        for (repository, cause) in failures {
            println!("    - {}: {}", repository, cause);
        }
    }

    if summary.has_failures() {
        anyhow::bail!("{} repository updates failed", summary.failure_count());
    }

    Ok(())
}
