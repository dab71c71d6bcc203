use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use bengkel_events::{BusInvalidator, EventBus, InMemoryEventBus, Invalidation};
use bengkel_infra::config::AppConfig;
use bengkel_infra::record_store::RecordStore;
use bengkel_infra::services::{InventoryMutationService, InventoryQueryService};

pub type SharedStore = Arc<dyn RecordStore>;
pub type InvalidationBus = Arc<InMemoryEventBus<Invalidation>>;

/// How many times each view topic has been invalidated since startup.
///
/// Stands in for the rendering layer: it only counts what it is told.
#[derive(Debug, Default)]
pub struct ViewRevisions {
    inner: Mutex<BTreeMap<String, u64>>,
}

impl ViewRevisions {
    pub fn record(&self, topic: &str) {
        if let Ok(mut map) = self.inner.lock() {
            *map.entry(topic.to_string()).or_insert(0) += 1;
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.inner.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

pub struct AppServices {
    pub query: InventoryQueryService<SharedStore>,
    pub mutation: InventoryMutationService<SharedStore, BusInvalidator<InvalidationBus>>,
    pub views: Arc<ViewRevisions>,
}

pub fn build_services(store: SharedStore, config: &AppConfig) -> AppServices {
    let bus: InvalidationBus = Arc::new(InMemoryEventBus::new());
    let views = Arc::new(ViewRevisions::default());

    // Background subscriber: bus -> view revisions. Ends when the bus is dropped.
    {
        let sub = bus.subscribe();
        let views = views.clone();
        tokio::task::spawn_blocking(move || {
            while let Ok(invalidation) = sub.recv() {
                tracing::debug!(topic = %invalidation.topic, "view invalidated");
                views.record(&invalidation.topic);
            }
        });
    }

    let query = InventoryQueryService::new(store.clone(), config.defaults);
    let mutation = InventoryMutationService::new(store, BusInvalidator::new(bus), config.defaults)
        .with_topics(config.invalidation_topics.iter().cloned());

    AppServices {
        query,
        mutation,
        views,
    }
}
