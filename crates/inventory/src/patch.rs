//! Partial updates to an inventory item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use bengkel_core::{DomainError, RecordId};

use crate::item::CompatibilityCar;

/// Fields to change on an item. `None` means "leave as is".
///
/// Has no `id` field: identifiers are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_cars: Option<Vec<CompatibilityCar>>,
}

impl InventoryPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(invoice) = &self.invoice {
            if invoice.trim().is_empty() {
                return Err(DomainError::validation("invoice cannot be empty"));
            }
        }
        if let Some(price) = self.price {
            if price < Decimal::ZERO {
                return Err(DomainError::validation("price cannot be negative"));
            }
        }
        Ok(())
    }

    /// Store-facing form: only the fields being changed, camelCase keys.
    pub fn to_record(&self) -> Map<String, JsonValue> {
        match serde_json::to_value(self) {
            Ok(JsonValue::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Update request: target id plus the fields to change, as one flat object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItem {
    pub id: RecordId,
    #[serde(flatten)]
    pub patch: InventoryPatch,
}

impl UpdateItem {
    pub fn new(id: RecordId, patch: InventoryPatch) -> Self {
        Self { id, patch }
    }

    /// Separate the target id from the fields to change.
    pub fn into_parts(self) -> (RecordId, InventoryPatch) {
        (self.id, self.patch)
    }
}
