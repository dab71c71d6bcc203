use serde::{Deserialize, Serialize};
use thiserror::Error;

use bengkel_core::DomainError;
use bengkel_inventory::InventoryItem;

use crate::record_store::StoreError;

/// Message reported when an update/delete targets a nonexistent id.
pub const NOT_FOUND_MESSAGE: &str = "Item not found";

/// Inventory service failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Item not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Malformed(String),
}

impl InventoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::NotFound => ErrorKind::NotFound,
            InventoryError::Store(_) => ErrorKind::StoreFailure,
            InventoryError::Validation(_) => ErrorKind::Validation,
            InventoryError::Malformed(_) => ErrorKind::Malformed,
        }
    }

    /// Human-readable message; `fallback` stands in for an empty detail.
    pub fn message_or(&self, fallback: &str) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            fallback.to_string()
        } else {
            msg
        }
    }
}

impl From<DomainError> for InventoryError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Malformed(_) => InventoryError::Malformed(e.to_string()),
            DomainError::Validation(_) | DomainError::InvalidId(_) => {
                InventoryError::Validation(e.to_string())
            }
        }
    }
}

/// Machine-readable failure discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    StoreFailure,
    Validation,
    Malformed,
}

/// Result of an update or delete, in the shape handed to the UI layer.
///
/// `{success: true, item?}` or `{success: false, error, kind}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<InventoryItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl MutationOutcome {
    pub fn updated(item: InventoryItem) -> Self {
        Self {
            success: true,
            item: Some(item),
            error: None,
            kind: None,
        }
    }

    pub fn deleted() -> Self {
        Self {
            success: true,
            item: None,
            error: None,
            kind: None,
        }
    }

    pub fn failed(err: &InventoryError, fallback: &str) -> Self {
        Self {
            success: false,
            item: None,
            error: Some(err.message_or(fallback)),
            kind: Some(err.kind()),
        }
    }
}
