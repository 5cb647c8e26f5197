//! Key-value storage backends.
//!
//! Values are stored as JSON text, one document per key. Readers of the
//! stored data must expect anything: a missing key, text that is not JSON,
//! or JSON of the wrong shape.

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// A string-keyed store of JSON documents.
pub trait KeyValueStore {
    /// Reads the document stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written and
    /// `StorageRead` when the stored text cannot be read or parsed.
    fn get(&self, key: &str) -> EngineResult<Option<Value>>;

    /// Replaces the document stored under `key`.
    fn set(&mut self, key: &str, value: Value) -> EngineResult<()>;
}

/// An in-memory store.
///
/// Holds raw text so corrupted documents can be represented.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text under `key` without validating it.
    pub fn insert_raw(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.entries.insert(key.into(), raw.into());
    }

    /// Returns the raw text stored under `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> EngineResult<Option<Value>> {
        self.entries
            .get(key)
            .map(|raw| parse_document(key, raw))
            .transpose()
    }

    fn set(&mut self, key: &str, value: Value) -> EngineResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store keeping each key in `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory which then replaces
/// the target, so a crash mid-write never leaves a truncated document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> EngineResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| EngineError::StorageWrite {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    /// The directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\']);
        valid.then(|| self.dir.join(format!("{}.json", key)))
    }

    fn write_atomic(&self, path: &Path, value: &Value) -> std::io::Result<()> {
        let temp_file = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer(&mut writer, value)?;
            writer.flush()?;
        }
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> EngineResult<Option<Value>> {
        let path = self.path_for(key).ok_or_else(|| EngineError::StorageRead {
            key: key.to_string(),
            message: "invalid storage key".to_string(),
        })?;

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(EngineError::StorageRead {
                    key: key.to_string(),
                    message: e.to_string(),
                });
            }
        };

        parse_document(key, &raw).map(Some)
    }

    fn set(&mut self, key: &str, value: Value) -> EngineResult<()> {
        let path = self.path_for(key).ok_or_else(|| EngineError::StorageWrite {
            key: key.to_string(),
            message: "invalid storage key".to_string(),
        })?;

        self.write_atomic(&path, &value)
            .map_err(|e| EngineError::StorageWrite {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        debug!(key, path = %path.display(), "Wrote storage document");
        Ok(())
    }
}

fn parse_document(key: &str, raw: &str) -> EngineResult<Value> {
    serde_json::from_str(raw).map_err(|e| EngineError::StorageRead {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("teachingEmployees").unwrap(), None);

        store.set("teachingEmployees", json!([{"id": "EMP001"}])).unwrap();
        let value = store.get("teachingEmployees").unwrap().unwrap();
        assert_eq!(value[0]["id"], "EMP001");
    }

    #[test]
    fn test_memory_store_reports_corrupt_text() {
        let mut store = MemoryStore::new();
        store.insert_raw("payslips", "{not json");

        match store.get("payslips") {
            Err(EngineError::StorageRead { key, .. }) => assert_eq!(key, "payslips"),
            other => panic!("Expected StorageRead, got {:?}", other),
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("payslips").unwrap(), None);
        store.set("payslips", json!({"EMP001": {"hra": "9000"}})).unwrap();

        assert!(dir.path().join("payslips.json").exists());
        let value = store.get("payslips").unwrap().unwrap();
        assert_eq!(value["EMP001"]["hra"], "9000");
    }

    #[test]
    fn test_file_store_overwrites_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        store.set("k", json!([1, 2, 3])).unwrap();
        store.set("k", json!([])).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!([])));
    }

    #[test]
    fn test_file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("teachingEmployees.json"), "[{").unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.get("teachingEmployees"),
            Err(EngineError::StorageRead { .. })
        ));
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.set("../escape", json!(1)),
            Err(EngineError::StorageWrite { .. })
        ));
        assert!(matches!(
            store.get("a/b"),
            Err(EngineError::StorageRead { .. })
        ));
    }
}
