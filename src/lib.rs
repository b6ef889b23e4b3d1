//! # ECR Policy Library
//!
//! This library provides the core functionality for applying declarative
//! repository policies to ECR repositories. It is designed to be used by the
//! `ecr-policy` command-line tool but can also be integrated into other
//! applications that manage registry policies in bulk.
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: One small YAML file per repository naming
//!   the repository and pointing at its JSON policy document. Files are
//!   discovered recursively, parsed strictly, and their policy documents
//!   validated as well-formed JSON.
//! - **Registry Operations (`registry`)**: The trait seam to the remote
//!   registry. The default implementation wraps the system `aws` command;
//!   tests inject mocks.
//! - **Update Engine (`updater`)**: Deduplicates the batch by repository
//!   name (fatal on duplicates), then applies every policy in parallel, one
//!   worker per repository, joining before any result is read.
//! - **Summary (`summary`)**: The thread-safe collector of per-repository
//!   outcomes. After a run, every submitted repository appears in exactly
//!   one of its two sets: successes or failures.
//!
//! ## Execution Flow
//!
//! 1. Discover and load all configuration files (`config::load_dir`).
//! 2. Check for duplicate repository names (`updater::check_duplicates`).
//! 3. Dispatch all updates in parallel (`updater::PolicyUpdater::run`).
//! 4. Read the returned `UpdateSummary` to report and pick the exit status.
//!
//! A dry run performs steps 1-2 and stops: validation without dispatch is a
//! caller-level decision, invisible to the update engine.

pub mod config;
pub mod defaults;
pub mod error;
pub mod output;
pub mod registry;
pub mod summary;
pub mod updater;
