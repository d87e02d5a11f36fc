//! Schema discovery and event naming.
//!
//! Walks a schema directory tree, producing one [`SchemaFileEntry`] per JSON
//! file, each carrying the logical event name derived from the file's
//! location. Naming is a pure function of the path; the same path always
//! yields the same name, and callers can inject their own convention through
//! [`discover_with`].

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// One discovered schema file and its derived event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFileEntry {
    pub path: PathBuf,
    pub event_name: String,
}

/// Derive an event name from a schema file path.
///
/// Covers both upstream layouts:
/// - versioned: `.../ActivityTriggered/1.1.0.json` names the event after the
///   containing directory (the file stem is a version number);
/// - flat: `.../Activity_Triggered.json` names the event after the file stem.
pub fn event_name_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if looks_like_version(&stem) {
        if let Some(dir_name) = path.parent().and_then(|p| p.file_name()) {
            return dir_name.to_string_lossy().into_owned();
        }
    }
    stem
}

fn looks_like_version(stem: &str) -> bool {
    !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Discover every JSON schema file under `schema_dir` using the default
/// naming convention.
///
/// Entries appear in directory traversal order. A missing or empty
/// directory yields an empty catalog, never an error.
pub fn discover(schema_dir: &Path) -> Vec<SchemaFileEntry> {
    discover_with(schema_dir, event_name_for)
}

/// Discover schema files with a caller-supplied naming convention.
pub fn discover_with<F>(schema_dir: &Path, name_of: F) -> Vec<SchemaFileEntry>
where
    F: Fn(&Path) -> String,
{
    WalkDir::new(schema_dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .map(|e| SchemaFileEntry {
            event_name: name_of(e.path()),
            path: e.into_path(),
        })
        .collect()
}
