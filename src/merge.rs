//! Schema directory merge.
//!
//! Recursively copies one schema tree onto another, overwriting destination
//! files on relative-path collision. The merge is not atomic: an I/O failure
//! partway leaves a partially-merged destination, and callers treat it as
//! fatal for the run.

use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Merge `source` into `dest`: every file and subdirectory of `source` is
/// copied under `dest`, source files winning on collision.
///
/// A missing `source` (or a `source` that is not a directory) is a no-op;
/// the destination is left byte-for-byte unchanged.
pub fn merge_schema_dirs(source: &Path, dest: &Path) -> Result<()> {
    if !source.is_dir() {
        debug!(
            "no schema directory at {}, skipping merge",
            source.display()
        );
        return Ok(());
    }

    let merge_err = |message: String| Error::Merge {
        src: source.display().to_string(),
        dst: dest.display().to_string(),
        message,
    };

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| merge_err(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| merge_err(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| merge_err(e.to_string()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| merge_err(e.to_string()))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| merge_err(e.to_string()))?;
        }
    }

    Ok(())
}
