//! Record store for products.
//!
//! The handler talks to a `RecordStore`; the shipped implementation,
//! `KvRecordStore`, keeps each product as a JSON document in a key-value
//! table (Spin's Key-Value Store in production).
//!
//! # Example
//!
//! ```rust,ignore
//! use produtos_store::{KvRecordStore, MemoryBackend, RecordStore};
//!
//! let store = KvRecordStore::new(MemoryBackend::new(), "produto:");
//! store.put(&product)?;
//!
//! let found = store.get(&product.id)?;
//! let all = store.scan()?;
//! store.delete(&product.id)?;
//! ```

mod backend;
mod error;
mod kv;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use backend::{KeyValueBackend, MemoryBackend};
pub use error::StoreError;
pub use kv::{KvRecordStore, DEFAULT_KEY_PREFIX};
#[cfg(target_arch = "wasm32")]
pub use spin::SpinBackend;

use chrono::{DateTime, Utc};
use produtos_core::{Product, ProductId, ProductPatch};

/// Operations the handler needs from the product table.
pub trait RecordStore {
    /// Look up a record by id.
    fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Write a record, replacing any record with the same id.
    fn put(&self, product: &Product) -> Result<(), StoreError>;

    /// Apply `patch` to an existing record and stamp `updated_at`.
    ///
    /// Fails with `StoreError::NotFound` when the record does not exist.
    fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Product, StoreError>;

    /// Remove a record. Removing an unknown id is not an error.
    fn delete(&self, id: &ProductId) -> Result<(), StoreError>;

    /// Every record in the table.
    fn scan(&self) -> Result<Vec<Product>, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id)
    }

    fn put(&self, product: &Product) -> Result<(), StoreError> {
        (**self).put(product)
    }

    fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Product, StoreError> {
        (**self).update(id, patch, updated_at)
    }

    fn delete(&self, id: &ProductId) -> Result<(), StoreError> {
        (**self).delete(id)
    }

    fn scan(&self) -> Result<Vec<Product>, StoreError> {
        (**self).scan()
    }
}
