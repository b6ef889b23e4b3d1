//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `ecr-policy` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! Each command module contains an `Args` struct defining the
//! command-specific arguments (derived with `clap`) and an `execute`
//! function that performs the command's logic by calling into the
//! `ecr_policy` library.

pub mod apply;
pub mod completions;
pub mod validate;
