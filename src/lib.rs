//! # schema-prep Library
//!
//! Core functionality for preparing a local set of JSON event schemas from
//! two upstream git repositories: a core schema repository and an operations
//! schema repository whose schemas are merged on top of the core set.
//!
//! ## Core Concepts
//!
//! - **Proxy (`proxy`)**: optional HTTP proxy settings from a
//!   `proxy.properties` resource, resolved into an explicit descriptor that
//!   is passed into every network-capable call.
//! - **Synchronization (`sync`, `git`)**: clone-if-absent /
//!   reconcile-if-present state machine that brings a local checkout to a
//!   requested remote branch, built on the system `git` binary behind a
//!   trait seam.
//! - **Merge (`merge`)**: recursive copy of the operations schema directory
//!   into the core schema directory, operations winning on collision.
//! - **Catalog (`catalog`)**: discovery of JSON schema files and derivation
//!   of each file's logical event name.
//! - **Transform (`transform`)**: idempotent in-place rewrite of a schema
//!   file to carry its event name.
//! - **Pipeline (`pipeline`)**: linear orchestration of the above; run-fatal
//!   sync/merge errors, per-file transform errors collected into a report.
//!
//! The `schema-prep` binary is a thin clap wrapper around this library.

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod git;
pub mod merge;
pub mod pipeline;
pub mod proxy;
pub mod sync;
pub mod transform;
