use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use bengkel_core::{DomainError, RecordId};

/// A vehicle a spare part fits. Owned by its item; no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityCar {
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub year: String,
}

impl CompatibilityCar {
    pub fn new(brand: impl Into<String>, model: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            year: year.into(),
        }
    }
}

/// Values filled in for optional fields absent from a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationDefaults {
    pub price: Decimal,
    pub stock: u32,
}

impl Default for NormalizationDefaults {
    fn default() -> Self {
        Self {
            price: Decimal::new(2999, 2),
            stock: 10,
        }
    }
}

/// Normalized inventory item.
///
/// Every instance has a price, a stock count and a (possibly empty) list of
/// compatible cars; construct it from a store record with
/// [`InventoryItem::from_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: RecordId,
    pub invoice: String,
    pub retail_name: String,
    pub price: Decimal,
    pub stock: u32,
    pub compatibility_cars: Vec<CompatibilityCar>,
    pub created_at: String,
}

/// Shape of a record as the store hands it over: optional fields stay optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInventoryRecord {
    id: String,
    invoice: String,
    retail_name: String,
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default)]
    stock: Option<u32>,
    #[serde(default)]
    compatibility_cars: Option<Vec<CompatibilityCar>>,
    #[serde(default)]
    created_at: Option<String>,
}

impl InventoryItem {
    /// Read an untyped store record as an inventory item, filling defaults.
    ///
    /// Missing or `null` optional fields get their default; present values
    /// (including zero) are kept. Missing required fields or wrongly typed
    /// values yield [`DomainError::Malformed`].
    pub fn from_record(
        record: &Map<String, JsonValue>,
        defaults: &NormalizationDefaults,
    ) -> Result<Self, DomainError> {
        let raw: RawInventoryRecord = serde_json::from_value(JsonValue::Object(record.clone()))
            .map_err(|e| DomainError::malformed(e.to_string()))?;

        let id = RecordId::new(raw.id).map_err(|e| DomainError::malformed(e.to_string()))?;

        Ok(Self {
            id,
            invoice: raw.invoice,
            retail_name: raw.retail_name,
            price: raw.price.unwrap_or(defaults.price),
            stock: raw.stock.unwrap_or(defaults.stock),
            compatibility_cars: raw.compatibility_cars.unwrap_or_default(),
            created_at: raw.created_at.unwrap_or_default(),
        })
    }
}
