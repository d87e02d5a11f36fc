//! Orchestrator for the complete schema preparation run.
//!
//! This module coordinates the individual steps to provide a clean API for
//! one end-to-end run:
//!
//! 1. Synchronize the core schema repository.
//! 2. Synchronize the operations schema repository.
//! 3. Merge the operations schema directory into the core schema directory.
//! 4. Catalog every JSON schema under the core schema directory.
//! 5. Transform each cataloged schema in place (parallel; each file is
//!    independent).
//!
//! Sync and merge failures abort the run. Transform failures are collected
//! per file into the [`RunReport`] and never block the rest of the batch.

use log::{info, warn};
use rayon::prelude::*;

use crate::catalog;
use crate::error::{Error, Result};
use crate::merge;
use crate::proxy::ProxyDescriptor;
use crate::sync::{GitOperations, RemoteRepository, RepoSynchronizer};
use crate::transform;

/// Outcome of one run: how many schemas were rewritten and which ones
/// failed.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Number of schema files successfully transformed.
    pub transformed: usize,
    /// Per-file transform failures, in no particular order.
    pub failures: Vec<Error>,
}

impl RunReport {
    /// A run is only a success when every cataloged schema was transformed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Execute the complete preparation pipeline.
///
/// After this returns `Ok`, the core checkout's schema directory contains
/// the union of core and operations schemas (operations winning on
/// collision) and every file in that union has been passed through the
/// transformer exactly once.
pub fn execute<G: GitOperations>(
    synchronizer: &RepoSynchronizer<G>,
    core: &RemoteRepository,
    operations: &RemoteRepository,
    proxy: Option<&ProxyDescriptor>,
) -> Result<RunReport> {
    info!("synchronizing core repository {}@{}", core.url, core.branch);
    synchronizer.sync(core, proxy)?;

    info!(
        "synchronizing operations repository {}@{}",
        operations.url, operations.branch
    );
    synchronizer.sync(operations, proxy)?;

    let core_schemas = core.schema_dir();
    let operations_schemas = operations.schema_dir();
    info!(
        "merging {} into {}",
        operations_schemas.display(),
        core_schemas.display()
    );
    merge::merge_schema_dirs(&operations_schemas, &core_schemas)?;

    let entries = catalog::discover(&core_schemas);
    info!("discovered {} schema file(s)", entries.len());

    let failures: Vec<Error> = entries
        .par_iter()
        .filter_map(|entry| match transform::transform(entry) {
            Ok(()) => None,
            Err(e) => {
                warn!("{}", e);
                Some(e)
            }
        })
        .collect();

    let report = RunReport {
        transformed: entries.len() - failures.len(),
        failures,
    };
    info!(
        "transformed {} schema file(s), {} failure(s)",
        report.transformed,
        report.failures.len()
    );
    Ok(report)
}
