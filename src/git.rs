//! Raw git command helpers.
//!
//! Every operation shells out to the system `git` binary, which automatically
//! handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! Proxy routing is explicit: when a [`ProxyDescriptor`] is supplied, it is
//! applied to that single invocation via `-c http.proxy=... -c
//! https.proxy=...`, never via global or environment state.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::defaults::FALLBACK_BRANCH;
use crate::error::{Error, Result};
use crate::proxy::ProxyDescriptor;

/// Run `git` with the given arguments, optionally inside a working directory
/// and optionally routed through a proxy. Returns trimmed stdout.
fn run_git(dir: Option<&Path>, args: &[&str], proxy: Option<&ProxyDescriptor>) -> Result<String> {
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.arg("-C").arg(dir);
    }
    if let Some(proxy) = proxy {
        let url = proxy.http_url();
        cmd.args(["-c", &format!("http.proxy={}", url)]);
        cmd.args(["-c", &format!("https.proxy={}", url)]);
    }
    cmd.args(args);

    let output = cmd.output().map_err(|e| Error::GitCommand {
        command: args.join(" "),
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Clone a repository's default branch into `target_dir`.
pub fn clone(url: &str, target_dir: &Path, proxy: Option<&ProxyDescriptor>) -> Result<()> {
    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }
    let target = target_dir.to_string_lossy();
    run_git(None, &["clone", url, &target], proxy)?;
    Ok(())
}

/// Discard uncommitted modifications in the working tree.
pub fn reset_hard(dir: &Path) -> Result<()> {
    run_git(Some(dir), &["reset", "--hard"], None)?;
    Ok(())
}

/// Check out a branch, creating a local tracking branch for a remote branch
/// when needed (git's checkout DWIM).
pub fn checkout(dir: &Path, branch: &str) -> Result<()> {
    run_git(Some(dir), &["checkout", branch], None)?;
    Ok(())
}

/// Pull the latest changes from the remote.
pub fn pull(dir: &Path, proxy: Option<&ProxyDescriptor>) -> Result<()> {
    run_git(Some(dir), &["pull"], proxy)?;
    Ok(())
}

/// Determine the remote's default branch from `refs/remotes/origin/HEAD`,
/// falling back to `master` when the ref is not recorded locally.
pub fn default_branch(dir: &Path) -> Result<String> {
    match run_git(
        Some(dir),
        &["symbolic-ref", "--short", "refs/remotes/origin/HEAD"],
        None,
    ) {
        Ok(full) => Ok(full
            .strip_prefix("origin/")
            .unwrap_or(full.as_str())
            .to_string()),
        Err(_) => Ok(FALLBACK_BRANCH.to_string()),
    }
}

/// Record the proxy address used for this checkout in the repository's
/// per-remote configuration (`remote.origin.proxy`).
pub fn set_remote_proxy(dir: &Path, address: &str) -> Result<()> {
    run_git(Some(dir), &["config", "remote.origin.proxy", address], None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // These tests exercise the command plumbing against a real local `git`;
    // nothing here touches the network.

    fn init_repo(dir: &Path) {
        run_git(Some(dir), &["init"], None).unwrap();
        run_git(Some(dir), &["config", "user.email", "test@example.com"], None).unwrap();
        run_git(Some(dir), &["config", "user.name", "Test"], None).unwrap();
    }

    #[test]
    fn test_run_git_failure_carries_stderr() {
        let temp = TempDir::new().unwrap();
        let err = run_git(Some(temp.path()), &["rev-parse", "HEAD"], None).unwrap_err();
        match err {
            Error::GitCommand { command, stderr } => {
                assert_eq!(command, "rev-parse HEAD");
                assert!(!stderr.is_empty());
            }
            other => panic!("expected GitCommand error, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_hard_discards_modifications() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        fs::write(temp.path().join("file.txt"), "original").unwrap();
        run_git(Some(temp.path()), &["add", "."], None).unwrap();
        run_git(Some(temp.path()), &["commit", "-m", "initial"], None).unwrap();

        fs::write(temp.path().join("file.txt"), "dirty").unwrap();
        reset_hard(temp.path()).unwrap();

        let content = fs::read_to_string(temp.path().join("file.txt")).unwrap();
        assert_eq!(content, "original");
    }

    #[test]
    fn test_default_branch_falls_back_without_origin_head() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        // No remote, so refs/remotes/origin/HEAD does not exist
        assert_eq!(default_branch(temp.path()).unwrap(), FALLBACK_BRANCH);
    }

    #[test]
    fn test_set_remote_proxy_writes_config() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        run_git(
            Some(temp.path()),
            &["remote", "add", "origin", "https://example.com/r.git"],
            None,
        )
        .unwrap();

        set_remote_proxy(temp.path(), "proxy.example.com:8080").unwrap();

        let recorded = run_git(
            Some(temp.path()),
            &["config", "--get", "remote.origin.proxy"],
            None,
        )
        .unwrap();
        assert_eq!(recorded, "proxy.example.com:8080");
    }

    #[test]
    fn test_clone_from_local_repo() {
        let temp = TempDir::new().unwrap();
        let upstream = temp.path().join("upstream");
        fs::create_dir_all(&upstream).unwrap();
        init_repo(&upstream);
        fs::write(upstream.join("schema.json"), "{}").unwrap();
        run_git(Some(&upstream), &["add", "."], None).unwrap();
        run_git(Some(&upstream), &["commit", "-m", "initial"], None).unwrap();

        let target = temp.path().join("checkouts").join("upstream");
        clone(&upstream.to_string_lossy(), &target, None).unwrap();

        assert!(target.join("schema.json").exists());
        assert!(target.join(".git").exists());
    }
}
