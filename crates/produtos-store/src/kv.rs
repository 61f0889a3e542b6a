//! Record store over a key-value table with JSON documents.

use chrono::{DateTime, Utc};
use produtos_core::{Product, ProductId, ProductPatch};

use crate::{KeyValueBackend, RecordStore, StoreError};

/// Key prefix used when none is configured.
pub const DEFAULT_KEY_PREFIX: &str = "produto:";

/// Type-safe product table backed by a key-value store.
///
/// Each product is stored as a JSON document under `{prefix}{id}`. Keys
/// without the prefix are ignored by `scan`, so the table can share a store
/// with other data.
pub struct KvRecordStore<B> {
    backend: B,
    prefix: String,
}

impl<B: KeyValueBackend> KvRecordStore<B> {
    /// Wrap `backend`, storing records under `prefix`.
    pub fn new(backend: B, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// Wrap `backend` with the default key prefix.
    pub fn with_default_prefix(backend: B) -> Self {
        Self::new(backend, DEFAULT_KEY_PREFIX)
    }

    /// The key a record with `id` lives under.
    pub fn record_key(&self, id: &ProductId) -> String {
        format!("{}{}", self.prefix, id)
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read(&self, key: &str) -> Result<Option<Product>, StoreError> {
        match self.backend.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write(&self, product: &Product) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(product)?;
        self.backend.set(&self.record_key(&product.id), &bytes)
    }
}

impl<B: KeyValueBackend> RecordStore for KvRecordStore<B> {
    fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        self.read(&self.record_key(id))
    }

    fn put(&self, product: &Product) -> Result<(), StoreError> {
        self.write(product)
    }

    fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Product, StoreError> {
        let key = self.record_key(id);
        let mut product = self
            .read(&key)?
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;

        product.apply(patch, updated_at);
        self.write(&product)?;
        Ok(product)
    }

    fn delete(&self, id: &ProductId) -> Result<(), StoreError> {
        self.backend.delete(&self.record_key(id))
    }

    fn scan(&self) -> Result<Vec<Product>, StoreError> {
        let mut products = Vec::new();
        for key in self.backend.get_keys()? {
            if !key.starts_with(&self.prefix) {
                continue;
            }
            // Deleted between listing and reading.
            if let Some(product) = self.read(&key)? {
                products.push(product);
            }
        }
        products.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(products)
    }
}
