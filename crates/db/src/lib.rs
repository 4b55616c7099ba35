//! Whole-file JSON document store.
//!
//! The store keeps a single JSON object on disk mapping document keys to
//! documents. Every load reads the whole file and every save rewrites it.
//! There is no locking between processes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Ordered key/document mapping held by a store file
pub type Documents = Map<String, Value>;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write store at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode store at {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// JSON object file keyed by document id
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    path: PathBuf,
}

impl JsonDocumentStore {
    /// Open the store at `path`, creating an empty one if the file is missing
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self { path: path.into() };
        store.ensure_file_exists()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every document.
    ///
    /// Content that is not a JSON object, including bytes that are not UTF-8,
    /// is logged and treated as an empty store.
    pub fn load(&self) -> StoreResult<Documents> {
        let contents = fs::read(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        match serde_json::from_slice::<Value>(&contents) {
            Ok(Value::Object(documents)) => {
                tracing::debug!(
                    path = %self.path.display(),
                    documents = documents.len(),
                    "loaded store"
                );
                Ok(documents)
            }
            Ok(other) => {
                tracing::warn!(
                    path = %self.path.display(),
                    kind = json_kind(&other),
                    "store is not a JSON object, treating it as empty"
                );
                Ok(Documents::new())
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "store is not valid UTF-8 JSON, treating it as empty"
                );
                Ok(Documents::new())
            }
        }
    }

    /// Replace the file contents with `documents`.
    ///
    /// Writes to a temporary file beside the target and renames it into place.
    /// An existing file keeps its permissions.
    pub fn save(&self, documents: &Documents) -> StoreResult<()> {
        let encoded = encode_pretty(documents).map_err(|e| StoreError::Encode {
            path: self.path.clone(),
            source: e,
        })?;

        let mut temp_file = NamedTempFile::new_in(self.parent_dir()).map_err(|e| {
            StoreError::Write {
                path: self.path.clone(),
                source: e,
            }
        })?;
        temp_file
            .write_all(&encoded)
            .and_then(|()| temp_file.flush())
            .map_err(|e| StoreError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            temp_file
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| StoreError::Write {
                    path: self.path.clone(),
                    source: e,
                })?;
        }
        temp_file
            .persist(&self.path)
            .map_err(|e| StoreError::Write {
                path: self.path.clone(),
                source: e.error,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            documents = documents.len(),
            "saved store"
        );
        Ok(())
    }

    /// Drop every document
    pub fn clear(&self) -> StoreResult<()> {
        self.save(&Documents::new())
    }

    fn ensure_file_exists(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Ok(());
        }

        let dir = self.parent_dir();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| StoreError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        }

        tracing::info!(path = %self.path.display(), "creating empty store");
        self.clear()
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

fn encode_pretty(documents: &Documents) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    documents.serialize(&mut serializer)?;
    Ok(buf)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn document(title: &str) -> Value {
        json!({ "title": title })
    }

    #[test]
    fn test_open_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = JsonDocumentStore::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_open_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"a": {"title": "kept"}}"#).unwrap();

        let store = JsonDocumentStore::open(&path).unwrap();

        assert_eq!(store.load().unwrap()["a"], document("kept"));
    }

    #[test]
    fn test_save_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonDocumentStore::open(dir.path().join("store.json")).unwrap();

        let mut documents = Documents::new();
        for key in ["zulu", "alpha", "mike"] {
            documents.insert(key.to_string(), document(key));
        }
        store.save(&documents).unwrap();

        let keys: Vec<_> = store.load().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_save_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let store = JsonDocumentStore::open(dir.path().join("store.json")).unwrap();

        let mut documents = Documents::new();
        documents.insert("a".to_string(), document("x"));
        store.save(&documents).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n    \"a\": {\n        \"title\": \"x\""));
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonDocumentStore::open(&path).unwrap();

        assert!(store.load().unwrap().is_empty());
        // loading never rewrites the file
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn test_invalid_utf8_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, [0x7b, 0xff, 0xfe, 0x7d]).unwrap();

        let store = JsonDocumentStore::open(&path).unwrap();

        assert!(store.load().unwrap().is_empty());
        assert_eq!(fs::read(&path).unwrap(), vec![0x7b, 0xff, 0xfe, 0x7d]);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = JsonDocumentStore::open(&path).unwrap();
        store.save(&Documents::new()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_non_object_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let store = JsonDocumentStore::open(&path).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_clear_empties_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonDocumentStore::open(dir.path().join("store.json")).unwrap();
        let mut documents = Documents::new();
        documents.insert("a".to_string(), document("x"));
        store.save(&documents).unwrap();

        store.clear().unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let store = JsonDocumentStore::open(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
