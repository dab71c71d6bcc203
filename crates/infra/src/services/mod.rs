//! Inventory query and mutation services.
//!
//! Both services sit on the record store boundary: records come in untyped,
//! leave as normalized [`bengkel_inventory::InventoryItem`]s, and every store
//! fault is caught here rather than propagated to callers.

pub mod error;
pub mod inventory_mutation;
pub mod inventory_query;

pub use error::{ErrorKind, InventoryError, MutationOutcome};
pub use inventory_mutation::{DEFAULT_INVALIDATION_TOPICS, InventoryMutationService};
pub use inventory_query::InventoryQueryService;
