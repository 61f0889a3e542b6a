//! JSON-file table for local runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use produtos_store::{KeyValueBackend, StoreError};
use serde_json::Value;

/// Key-value backend persisted as one JSON object per file.
///
/// Every value must be a JSON document; the file maps each key to its
/// parsed document so the table stays readable. The whole file is
/// rewritten after each mutation.
pub struct FileBackend {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl FileBackend {
    /// Open the table at `path`. A missing file is an empty table.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                StoreError::OpenError(format!("reading {}: {}", path.display(), e))
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn persist(&self, entries: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| StoreError::Backend(format!("writing {}: {}", self.path.display(), e)))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self.entries.lock().get(key) {
            Some(value) => Ok(Some(serde_json::to_vec(value)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let document: Value = serde_json::from_slice(value)?;
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), document);
        self.persist(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn get_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.lock().keys().cloned().collect())
    }
}
