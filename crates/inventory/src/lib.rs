//! Inventory (spare parts) domain module.
//!
//! This crate contains the typed inventory entity, schema-on-read
//! normalization of raw store records, search strategies, update patches and
//! display helpers. It is deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod display;
pub mod item;
pub mod patch;
pub mod search;

pub use display::{format_currency, format_date};
pub use item::{CompatibilityCar, InventoryItem, NormalizationDefaults};
pub use patch::{InventoryPatch, UpdateItem};
pub use search::{InventoryQuery, SearchStrategy};
