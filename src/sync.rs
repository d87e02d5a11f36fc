//! # Repository Synchronization
//!
//! Brings a local checkout directory to a requested remote branch using
//! clone-if-absent / reconcile-if-present semantics.
//!
//! ## Design
//!
//! The synchronization state machine is separated from concrete git
//! execution through the [`GitOperations`] trait. In the application,
//! [`SystemGit`] wraps the actual `git` command; in tests, a fake
//! implementation records the operation sequence so the Clone-vs-Reconcile
//! decision and its ordering can be verified without touching the network.
//!
//! The filesystem is the only record of prior synchronization: an existing
//! local path is treated as a valid previous checkout and reconciled, a
//! missing one is cloned. Local drift (manual edits, partial previous runs)
//! is discarded by a hard reset so repeated runs converge to the same
//! branch/content state.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::git;
use crate::proxy::ProxyDescriptor;

/// Hint attached to every synchronization failure; network errors behind a
/// misconfigured proxy are the most common cause.
const PROXY_HINT: &str =
    "check proxy settings; if a proxy is required, update proxy.properties and re-run";

/// A remote repository pinned to a branch, with its local checkout location.
///
/// Identity is (url, branch); constructed once per invocation and
/// synchronized exactly once per run.
#[derive(Debug, Clone)]
pub struct RemoteRepository {
    pub url: String,
    pub branch: String,
    pub local_path: PathBuf,
}

impl RemoteRepository {
    pub fn new(url: impl Into<String>, branch: impl Into<String>, local_path: PathBuf) -> Self {
        Self {
            url: url.into(),
            branch: branch.into(),
            local_path,
        }
    }

    /// Location of the schema directory inside this checkout.
    pub fn schema_dir(&self) -> PathBuf {
        self.local_path.join(crate::defaults::SCHEMA_SUBDIR)
    }
}

/// Trait for git operations - allows faking in tests
pub trait GitOperations {
    /// Clone the remote's default branch into `target_dir`.
    fn clone_repo(&self, url: &str, target_dir: &Path, proxy: Option<&ProxyDescriptor>)
        -> Result<()>;

    /// Discard uncommitted modifications in the working tree.
    fn reset_hard(&self, dir: &Path) -> Result<()>;

    /// Check out a branch.
    fn checkout(&self, dir: &Path, branch: &str) -> Result<()>;

    /// Pull the latest changes from the remote.
    fn pull(&self, dir: &Path, proxy: Option<&ProxyDescriptor>) -> Result<()>;

    /// The repository's primary/default branch.
    fn default_branch(&self, dir: &Path) -> Result<String>;

    /// Record the proxy address in the checkout's per-remote configuration.
    fn set_remote_proxy(&self, dir: &Path, address: &str) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real git operations.
pub struct SystemGit;

impl GitOperations for SystemGit {
    fn clone_repo(
        &self,
        url: &str,
        target_dir: &Path,
        proxy: Option<&ProxyDescriptor>,
    ) -> Result<()> {
        git::clone(url, target_dir, proxy)
    }

    fn reset_hard(&self, dir: &Path) -> Result<()> {
        git::reset_hard(dir)
    }

    fn checkout(&self, dir: &Path, branch: &str) -> Result<()> {
        git::checkout(dir, branch)
    }

    fn pull(&self, dir: &Path, proxy: Option<&ProxyDescriptor>) -> Result<()> {
        git::pull(dir, proxy)
    }

    fn default_branch(&self, dir: &Path) -> Result<String> {
        git::default_branch(dir)
    }

    fn set_remote_proxy(&self, dir: &Path, address: &str) -> Result<()> {
        git::set_remote_proxy(dir, address)
    }
}

/// Synchronizes local checkouts with their remotes.
pub struct RepoSynchronizer<G: GitOperations> {
    git: G,
}

impl<G: GitOperations> RepoSynchronizer<G> {
    pub fn new(git: G) -> Self {
        Self { git }
    }

    /// Guarantee that `remote.local_path` contains a working copy checked
    /// out at `remote.branch`.
    ///
    /// A missing local path is cloned; an existing one is reconciled (hard
    /// reset, checkout of the default branch, pull, checkout of the
    /// requested branch). There is no fallback from one path to the other
    /// and no automatic retry. After a successful sync, the proxy address
    /// (when a proxy is in use) is recorded in the checkout's per-remote
    /// configuration; failure to record it is a warning, not a sync error.
    pub fn sync(&self, remote: &RemoteRepository, proxy: Option<&ProxyDescriptor>) -> Result<()> {
        let result = if remote.local_path.exists() {
            debug!(
                "reconciling existing checkout {} at {}",
                remote.url,
                remote.local_path.display()
            );
            self.reconcile(remote, proxy)
        } else {
            debug!(
                "cloning {} into {}",
                remote.url,
                remote.local_path.display()
            );
            self.clone(remote, proxy)
        };

        // On failure the checkout may not exist at all; propagate without
        // touching its configuration.
        result.map_err(|e| Error::Sync {
            url: remote.url.clone(),
            branch: remote.branch.clone(),
            message: e.to_string(),
            hint: Some(PROXY_HINT.to_string()),
        })?;

        if let Some(proxy) = proxy {
            if let Err(e) = self
                .git
                .set_remote_proxy(&remote.local_path, &proxy.address())
            {
                warn!(
                    "could not record proxy address for {}: {}",
                    remote.local_path.display(),
                    e
                );
            }
        }

        Ok(())
    }

    fn clone(&self, remote: &RemoteRepository, proxy: Option<&ProxyDescriptor>) -> Result<()> {
        self.git.clone_repo(&remote.url, &remote.local_path, proxy)?;
        self.git.checkout(&remote.local_path, &remote.branch)?;
        Ok(())
    }

    fn reconcile(&self, remote: &RemoteRepository, proxy: Option<&ProxyDescriptor>) -> Result<()> {
        let dir = &remote.local_path;
        self.git.reset_hard(dir)?;
        let default = self.git.default_branch(dir)?;
        self.git.checkout(dir, &default)?;
        self.git.pull(dir, proxy)?;
        self.git.checkout(dir, &remote.branch)?;
        Ok(())
    }
}
