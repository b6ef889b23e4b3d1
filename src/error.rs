//! # Error Handling
//!
//! Centralized error type for the `ecr-policy` application, built on
//! `thiserror`. The `Error` enum covers every anticipated failure mode:
//!
//! - Configuration file parsing and validation errors.
//! - Policy document validation errors.
//! - Duplicate repository names across the configuration batch.
//! - Registry update failures surfaced by the remote call.
//! - I/O and directory-walk errors wrapped from their source crates.
//!
//! Registry failures are deliberately opaque: the remote error text is
//! carried verbatim in a single `Registry` variant, with no classification
//! of the underlying cause (not-found, auth, throttling, ...). The caller
//! decides how to present them.

use thiserror::Error;

/// Main error type for ecr-policy operations
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration file could not be parsed or failed validation.
    #[error("Configuration parsing error in {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// A policy document referenced by a configuration file is not
    /// well-formed JSON or could not be read.
    #[error("Policy validation error for {path}: {message}")]
    PolicyParse { path: String, message: String },

    /// Two configuration files declare the same repository name.
    ///
    /// This is a fatal configuration error: the batch is aborted before any
    /// repository update is dispatched.
    #[error("Duplicate repository name '{repository}' found in {path}")]
    DuplicateRepository { repository: String, path: String },

    /// The registry rejected or failed a policy update.
    ///
    /// The message carries the remote error verbatim.
    #[error("Registry update error for {repository}: {message}")]
    Registry { repository: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory traversal error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
