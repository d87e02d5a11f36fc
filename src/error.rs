//! # Error Handling
//!
//! Centralized error type for `schema-prep`, built on `thiserror`. Each
//! variant maps to one failure class of the pipeline:
//!
//! - `Config`: bad or missing startup configuration (CLI arguments, proxy
//!   properties resource).
//! - `Sync`: repository synchronization failure (clone, reset, checkout or
//!   pull), optionally carrying a proxy-misconfiguration hint.
//! - `GitCommand`: a raw `git` invocation failed; wrapped into `Sync` by the
//!   synchronizer before it reaches the user.
//! - `Merge`: I/O failure while copying one schema tree onto another.
//! - `Transform`: a single schema file could not be rewritten (malformed
//!   JSON, non-object root, unreadable or unwritable file). Scoped to one
//!   file and recovered at the batch level.
//!
//! `Config`, `Sync` and `Merge` are fatal to a run; `Transform` is collected
//! per file and reported in the run summary.

use thiserror::Error;

/// Main error type for schema-prep operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing startup configuration.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// Repository synchronization failed for a (url, branch) pair.
    #[error("Synchronization error for {url}@{branch}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Sync {
        url: String,
        branch: String,
        message: String,
        /// Optional hint for how to resolve the sync issue
        hint: Option<String>,
    },

    /// A `git` subprocess exited unsuccessfully or could not be spawned.
    #[error("Git command failed: git {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// Copying the operations schema tree into the core schema tree failed.
    #[error("Merge error: {src} -> {dst}: {message}")]
    Merge {
        src: String,
        dst: String,
        message: String,
    },

    /// One schema file could not be transformed.
    #[error("Transform error for {path} (event {event}): {message}")]
    Transform {
        path: String,
        event: String,
        message: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
