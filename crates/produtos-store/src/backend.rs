//! Byte-level key-value backends.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::StoreError;

/// Raw key-value table: the subset of Spin's Key-Value Store the record
/// store needs.
pub trait KeyValueBackend {
    /// Get the bytes stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// All keys in the table.
    fn get_keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Arc<B> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn get_keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).get_keys()
    }
}

/// In-process table for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the table with existing entries.
    pub fn with_entries(entries: impl IntoIterator<Item = (String, Vec<u8>)>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Snapshot of every entry.
    pub fn entries(&self) -> BTreeMap<String, Vec<u8>> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn get_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        backend.set("a", b"1").unwrap();
        assert_eq!(backend.get("a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(backend.get("b").unwrap(), None);
    }

    #[test]
    fn test_memory_backend_delete_missing_is_ok() {
        let backend = MemoryBackend::new();
        assert!(backend.delete("missing").is_ok());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_memory_backend_keys_sorted() {
        let backend = MemoryBackend::with_entries(vec![
            ("b".to_string(), vec![]),
            ("a".to_string(), vec![]),
        ]);
        assert_eq!(backend.get_keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_shared_backend_through_arc() {
        let backend = Arc::new(MemoryBackend::new());
        let handle = Arc::clone(&backend);
        handle.set("k", b"v").unwrap();
        assert_eq!(backend.len(), 1);
    }
}
