//! CLI argument parsing and execution

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use schema_prep::defaults::{self, PROXY_PROPERTIES_FILE};
use schema_prep::error::Error;
use schema_prep::pipeline;
use schema_prep::proxy::ProxyConfig;
use schema_prep::sync::{RemoteRepository, RepoSynchronizer, SystemGit};

/// Prepare a local set of JSON event schemas from upstream git repositories
#[derive(Parser, Debug)]
#[command(name = "schema-prep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Core schema repository URL
    core_url: String,

    /// Branch of the core repository to check out
    core_branch: String,

    /// Operations schema repository URL
    operations_url: String,

    /// Branch of the operations repository to check out
    operations_branch: String,
}

impl Cli {
    /// Execute one preparation run.
    pub fn execute(self) -> Result<()> {
        let proxy_config = ProxyConfig::from_properties_file(Path::new(PROXY_PROPERTIES_FILE));
        let proxy = proxy_config.resolve()?;
        if let Some(descriptor) = &proxy {
            log::info!("routing git traffic through proxy {}", descriptor);
        }

        let root = defaults::checkout_root();
        let core_path = root.join(defaults::local_name(&self.core_url)?);
        let operations_path = root.join(defaults::local_name(&self.operations_url)?);
        if core_path == operations_path {
            return Err(Error::Config {
                message: format!(
                    "core and operations repositories both map to {}",
                    core_path.display()
                ),
                hint: Some(
                    "the two repository URLs must end in distinct names".to_string(),
                ),
            }
            .into());
        }

        let core = RemoteRepository::new(self.core_url, self.core_branch, core_path);
        let operations = RemoteRepository::new(
            self.operations_url,
            self.operations_branch,
            operations_path,
        );

        let synchronizer = RepoSynchronizer::new(SystemGit);
        let report = pipeline::execute(&synchronizer, &core, &operations, proxy.as_ref())?;

        println!(
            "Prepared {} schema file(s) in {}",
            report.transformed,
            core.schema_dir().display()
        );

        if !report.is_success() {
            for failure in &report.failures {
                eprintln!("  {}", failure);
            }
            anyhow::bail!(
                "{} schema file(s) could not be transformed",
                report.failures.len()
            );
        }
        Ok(())
    }
}
