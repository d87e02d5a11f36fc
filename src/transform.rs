//! In-place schema transformation.
//!
//! Rewrites one JSON schema file so it carries its derived event name in a
//! top-level `name` property, preserving every other property and the
//! document's key order. Applying the transform twice produces byte-identical
//! output, so repeated pipeline runs converge.

use std::fs;

use serde_json::Value;

use crate::catalog::SchemaFileEntry;
use crate::error::{Error, Result};

/// Top-level property that identifies a schema by its event name.
pub const EVENT_NAME_PROPERTY: &str = "name";

/// Rewrite `entry.path` with the event name injected.
///
/// Fails with a per-file [`Error::Transform`] when the file cannot be read,
/// does not parse as JSON, has a non-object root, or cannot be written back.
/// On a parse failure the file is left in its prior state.
pub fn transform(entry: &SchemaFileEntry) -> Result<()> {
    let transform_err = |message: String| Error::Transform {
        path: entry.path.display().to_string(),
        event: entry.event_name.clone(),
        message,
    };

    let raw = fs::read_to_string(&entry.path).map_err(|e| transform_err(e.to_string()))?;
    let mut document: Value =
        serde_json::from_str(&raw).map_err(|e| transform_err(format!("malformed JSON: {}", e)))?;

    let object = document
        .as_object_mut()
        .ok_or_else(|| transform_err("schema root is not a JSON object".to_string()))?;
    object.insert(
        EVENT_NAME_PROPERTY.to_string(),
        Value::String(entry.event_name.clone()),
    );

    let mut serialized =
        serde_json::to_string_pretty(&document).map_err(|e| transform_err(e.to_string()))?;
    serialized.push('\n');

    fs::write(&entry.path, serialized).map_err(|e| transform_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn entry_for(path: &Path, event: &str) -> SchemaFileEntry {
        SchemaFileEntry {
            path: path.to_path_buf(),
            event_name: event.to_string(),
        }
    }

    #[test]
    fn test_transform_adds_event_name_and_preserves_properties() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Activity_Triggered.json");
        fs::write(&path, r#"{"type":"object"}"#).unwrap();

        transform(&entry_for(&path, "Activity_Triggered")).unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["type"], "object");
        assert_eq!(doc["name"], "Activity_Triggered");
    }

    #[test]
    fn test_transform_overwrites_existing_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Activity_Finished.json");
        fs::write(&path, r#"{"name":"stale","type":"object"}"#).unwrap();

        transform(&entry_for(&path, "Activity_Finished")).unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["name"], "Activity_Finished");
    }

    #[test]
    fn test_transform_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Artifact_Created.json");
        fs::write(
            &path,
            r#"{"type":"object","properties":{"data":{"type":"object"}}}"#,
        )
        .unwrap();

        let entry = entry_for(&path, "Artifact_Created");
        transform(&entry).unwrap();
        let first = fs::read(&path).unwrap();
        transform(&entry).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_transform_preserves_key_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Ordered.json");
        fs::write(&path, r#"{"zeta":1,"alpha":2}"#).unwrap();

        transform(&entry_for(&path, "Ordered")).unwrap();

        let rewritten = fs::read_to_string(&path).unwrap();
        let zeta = rewritten.find("\"zeta\"").unwrap();
        let alpha = rewritten.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_transform_malformed_json_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = transform(&entry_for(&path, "Broken")).unwrap_err();
        match &err {
            Error::Transform { path: p, event, message } => {
                assert!(p.contains("Broken.json"));
                assert_eq!(event, "Broken");
                assert!(message.contains("malformed JSON"));
            }
            other => panic!("expected Transform error, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn test_transform_non_object_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Array.json");
        fs::write(&path, "[1,2,3]").unwrap();

        let err = transform(&entry_for(&path, "Array")).unwrap_err();
        assert!(format!("{}", err).contains("not a JSON object"));
    }

    #[test]
    fn test_transform_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Gone.json");

        let err = transform(&entry_for(&path, "Gone")).unwrap_err();
        assert!(matches!(err, Error::Transform { .. }));
    }
}
