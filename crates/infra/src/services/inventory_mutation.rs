use bengkel_core::RecordId;
use bengkel_events::Invalidator;
use bengkel_inventory::{InventoryItem, NormalizationDefaults, UpdateItem};

use crate::record_store::RecordStore;
use crate::services::error::{InventoryError, MutationOutcome};

/// Topics invalidated after every successful write.
pub const DEFAULT_INVALIDATION_TOPICS: [&str; 2] = ["/inventory/manage", "/dashboard"];

const UPDATE_FALLBACK: &str = "Failed to update inventory item";
const DELETE_FALLBACK: &str = "Failed to delete inventory item";

/// Write side of the inventory: partial update and delete of single items.
///
/// No version check is made; concurrent writes to one id resolve however the
/// store resolves them. Invalidations are emitted only after the store has
/// acknowledged the write.
#[derive(Debug)]
pub struct InventoryMutationService<S, I> {
    store: S,
    invalidator: I,
    defaults: NormalizationDefaults,
    topics: Vec<String>,
}

impl<S, I> InventoryMutationService<S, I>
where
    S: RecordStore,
    I: Invalidator,
{
    pub fn new(store: S, invalidator: I, defaults: NormalizationDefaults) -> Self {
        Self {
            store,
            invalidator,
            defaults,
            topics: DEFAULT_INVALIDATION_TOPICS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Replace the topics invalidated after a successful write.
    pub fn with_topics(mut self, topics: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub async fn try_update_item(&self, request: UpdateItem) -> Result<InventoryItem, InventoryError> {
        let (id, patch) = request.into_parts();
        patch.validate()?;

        let record = self
            .store
            .update(&id, patch.to_record())
            .await?
            .ok_or(InventoryError::NotFound)?;

        tracing::info!(item_id = %id, "inventory item updated");
        self.invalidate_views();

        // The write is committed even if the stored record no longer reads back cleanly.
        Ok(InventoryItem::from_record(&record, &self.defaults)?)
    }

    pub async fn try_delete_item(&self, id: &str) -> Result<(), InventoryError> {
        let id = RecordId::new(id)?;

        if !self.store.delete(&id).await? {
            return Err(InventoryError::NotFound);
        }

        tracing::info!(item_id = %id, "inventory item deleted");
        self.invalidate_views();
        Ok(())
    }

    /// `{success: true, item}` or `{success: false, error}`; never fails.
    pub async fn update_item(&self, request: UpdateItem) -> MutationOutcome {
        let id = request.id.clone();
        match self.try_update_item(request).await {
            Ok(item) => MutationOutcome::updated(item),
            Err(e) => {
                log_failure("update", id.as_str(), &e);
                MutationOutcome::failed(&e, UPDATE_FALLBACK)
            }
        }
    }

    /// `{success: true}` or `{success: false, error}`; never fails.
    pub async fn delete_item(&self, id: &str) -> MutationOutcome {
        match self.try_delete_item(id).await {
            Ok(()) => MutationOutcome::deleted(),
            Err(e) => {
                log_failure("delete", id, &e);
                MutationOutcome::failed(&e, DELETE_FALLBACK)
            }
        }
    }

    fn invalidate_views(&self) {
        for topic in &self.topics {
            self.invalidator.invalidate(topic);
        }
    }
}

fn log_failure(operation: &str, id: &str, err: &InventoryError) {
    match err {
        InventoryError::NotFound | InventoryError::Validation(_) => {
            tracing::warn!(operation, item_id = id, error = %err, "inventory mutation rejected");
        }
        InventoryError::Store(_) | InventoryError::Malformed(_) => {
            tracing::error!(operation, item_id = id, error = %err, "inventory mutation failed");
        }
    }
}
