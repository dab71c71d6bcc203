use bengkel_inventory::{InventoryItem, InventoryQuery, NormalizationDefaults, SearchStrategy};

use crate::record_store::{Record, RecordStore};
use crate::services::error::InventoryError;

/// Read side of the inventory: list and search normalized items.
///
/// Each call is a fresh round trip to the store; nothing is cached here.
/// The `try_*` methods report store faults; the plain methods log them and
/// return an empty list, so callers that only render cannot tell "no items"
/// from "store down".
#[derive(Debug)]
pub struct InventoryQueryService<S> {
    store: S,
    defaults: NormalizationDefaults,
}

impl<S> InventoryQueryService<S>
where
    S: RecordStore,
{
    pub fn new(store: S, defaults: NormalizationDefaults) -> Self {
        Self { store, defaults }
    }

    pub async fn try_list_items(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        let records = self.store.find_many().await?;
        Ok(self.normalize_all(records))
    }

    pub async fn try_search_items(
        &self,
        search_type: &str,
        search_term: &str,
    ) -> Result<Vec<InventoryItem>, InventoryError> {
        let query = InventoryQuery::new(SearchStrategy::parse(search_type), search_term);
        let items = self.try_list_items().await?;
        let matched = query.apply(items);

        tracing::debug!(
            strategy = %query.strategy(),
            term = search_term,
            matched = matched.len(),
            "inventory search"
        );
        Ok(matched)
    }

    /// All items; empty on any store fault (logged).
    pub async fn list_items(&self) -> Vec<InventoryItem> {
        match self.try_list_items().await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(error = %e, "failed to get inventory items");
                Vec::new()
            }
        }
    }

    /// Items matching `search_term` under `search_type`; empty on any store fault (logged).
    pub async fn search_items(&self, search_type: &str, search_term: &str) -> Vec<InventoryItem> {
        match self.try_search_items(search_type, search_term).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(error = %e, search_type, "failed to search inventory items");
                Vec::new()
            }
        }
    }

    fn normalize_all(&self, records: Vec<Record>) -> Vec<InventoryItem> {
        records
            .iter()
            .filter_map(|record| match InventoryItem::from_record(record, &self.defaults) {
                Ok(item) => Some(item),
                Err(e) => {
                    let id = record.get("id").and_then(|v| v.as_str()).unwrap_or("<none>");
                    tracing::warn!(record_id = id, error = %e, "skipping malformed inventory record");
                    None
                }
            })
            .collect()
    }
}
