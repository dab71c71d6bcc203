//! Generic record store client.
//!
//! The store holds one collection of untyped JSON records and exposes exactly
//! what the inventory services need. Implementations are async: every call is
//! a round trip to the backend and may suspend.

pub mod in_memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use bengkel_core::RecordId;

pub use in_memory::InMemoryRecordStore;

/// An untyped stored record (a JSON object).
pub type Record = Map<String, JsonValue>;

/// Record store operation error.
///
/// These are infrastructure faults; "no such record" is not an error here and
/// is reported through the `Option`/`bool` return values instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("record store backend error: {0}")]
    Backend(String),

    #[error("record store lock poisoned")]
    Poisoned,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record, in store order.
    async fn find_many(&self) -> Result<Vec<Record>, StoreError>;

    /// Merge `patch` into the record with `id`; `None` if there is no such record.
    async fn update(&self, id: &RecordId, patch: Record) -> Result<Option<Record>, StoreError>;

    /// Remove the record with `id`; `false` if there was no such record.
    async fn delete(&self, id: &RecordId) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn find_many(&self) -> Result<Vec<Record>, StoreError> {
        (**self).find_many().await
    }

    async fn update(&self, id: &RecordId, patch: Record) -> Result<Option<Record>, StoreError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }
}
