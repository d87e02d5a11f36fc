//! Default values and naming conventions for schema-prep.
//!
//! This module provides centralized defaults used across the pipeline,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Relative path of the schema directory inside each repository checkout.
pub const SCHEMA_SUBDIR: &str = "schemas";

/// Branch used when the remote's default branch cannot be determined.
pub const FALLBACK_BRANCH: &str = "master";

/// File name of the proxy credential resource, looked up in the current
/// working directory. Keys: `http.proxy.url`, `http.proxy.port`,
/// `http.proxy.username`, `http.proxy.password`.
pub const PROXY_PROPERTIES_FILE: &str = "proxy.properties";

/// Returns the root directory under which repository checkouts are placed.
///
/// Uses the user's home directory, falling back to the current directory if
/// the home directory cannot be determined.
pub fn checkout_root() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Derives the local checkout directory name for a remote URL.
///
/// Takes the last path segment of the URL and strips a trailing `.git`, so
/// `https://github.com/org/event-schemas.git` checks out into
/// `event-schemas`. Deterministic: the same URL always yields the same name.
///
/// A URL that yields an empty name is a configuration error: an empty name
/// would map the checkout onto the checkout root itself, and synchronization
/// runs destructive git commands (`reset --hard`) inside the checkout path.
pub fn local_name(url: &str) -> Result<String> {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or("");
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        return Err(Error::Config {
            message: format!(
                "cannot derive a checkout directory name from repository URL '{}'",
                url
            ),
            hint: Some("the URL's last path segment must name the repository".to_string()),
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_root_returns_path() {
        let root = checkout_root();
        assert!(root.is_absolute() || root == PathBuf::from("."));
    }

    #[test]
    fn test_local_name_strips_git_suffix() {
        assert_eq!(
            local_name("https://github.com/org/event-schemas.git").unwrap(),
            "event-schemas"
        );
    }

    #[test]
    fn test_local_name_without_git_suffix() {
        assert_eq!(
            local_name("https://github.com/org/event-schemas").unwrap(),
            "event-schemas"
        );
    }

    #[test]
    fn test_local_name_trailing_slash() {
        assert_eq!(local_name("https://github.com/org/schemas/").unwrap(), "schemas");
    }

    #[test]
    fn test_local_name_ssh_style_url() {
        assert_eq!(
            local_name("git@github.com:org/ops-schemas.git").unwrap(),
            "ops-schemas"
        );
    }

    #[test]
    fn test_local_name_is_deterministic() {
        let url = "https://example.com/a/b/c.git";
        assert_eq!(local_name(url).unwrap(), local_name(url).unwrap());
    }

    #[test]
    fn test_local_name_empty_url_is_config_error() {
        // An empty name would join to the checkout root itself
        let err = local_name("").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(format!("{}", err).contains("checkout directory name"));
    }

    #[test]
    fn test_local_name_pathless_url_is_config_error() {
        assert!(local_name("/").is_err());
        assert!(local_name("https://").is_err());
        assert!(local_name(".git").is_err());
    }
}
