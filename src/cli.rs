//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// ECR Policy - Apply declarative repository policies to ECR repositories
#[derive(Parser, Debug)]
#[command(name = "ecr-policy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "info",
        env = "LOG_LEVEL"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply every repository policy configuration to the registry
    Apply(commands::apply::ApplyArgs),

    /// Validate the configuration files without updating any repository
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Apply(args) => commands::apply::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Initialize the global logger from the --log-level flag.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    builder.format_timestamp_secs();
    // try_init so tests invoking execute() repeatedly don't panic
    let _ = builder.try_init();
}
