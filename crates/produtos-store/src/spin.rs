//! Spin Key-Value Store backend.

use crate::{KeyValueBackend, StoreError};

/// Backend over a Spin Key-Value store granted to the component.
pub struct SpinBackend {
    store: spin_sdk::key_value::Store,
}

impl SpinBackend {
    /// Open the default Key-Value store.
    pub fn open_default() -> Result<Self, StoreError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| StoreError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named Key-Value store.
    pub fn open(name: &str) -> Result<Self, StoreError> {
        if name == "default" {
            return Self::open_default();
        }
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| StoreError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }
}

impl KeyValueBackend for SpinBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.store
            .get(key)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.store
            .set(key, value)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store
            .delete(key)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn get_keys(&self) -> Result<Vec<String>, StoreError> {
        self.store
            .get_keys()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
