//! View invalidation signals.
//!
//! After a successful write, the services call [`Invalidator::invalidate`] once
//! per configured topic. Topics are opaque strings (the default deployment
//! uses view paths such as `/inventory/manage`); nothing here interprets them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bus::EventBus;

/// "Views derived from `topic` are stale."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invalidation {
    pub topic: String,
    pub issued_at: DateTime<Utc>,
}

impl Invalidation {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Sink for invalidation signals.
///
/// Invalidation is fire-and-forget: implementations must not fail the caller.
pub trait Invalidator: Send + Sync {
    fn invalidate(&self, topic: &str);
}

impl<I> Invalidator for std::sync::Arc<I>
where
    I: Invalidator + ?Sized,
{
    fn invalidate(&self, topic: &str) {
        (**self).invalidate(topic)
    }
}

/// Publishes each invalidation on an [`EventBus`].
#[derive(Debug)]
pub struct BusInvalidator<B> {
    bus: B,
}

impl<B> BusInvalidator<B>
where
    B: EventBus<Invalidation>,
{
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B> Invalidator for BusInvalidator<B>
where
    B: EventBus<Invalidation>,
{
    fn invalidate(&self, topic: &str) {
        if let Err(e) = self.bus.publish(Invalidation::new(topic)) {
            tracing::warn!(topic, error = ?e, "failed to publish invalidation");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::in_memory_bus::InMemoryEventBus;

    #[test]
    fn bus_invalidator_publishes_topic() {
        let bus: Arc<InMemoryEventBus<Invalidation>> = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe();
        let invalidator = BusInvalidator::new(bus.clone());

        invalidator.invalidate("/dashboard");

        let got = sub.try_recv().unwrap();
        assert_eq!(got.topic, "/dashboard");
    }

    #[test]
    fn invalidation_serializes_topic_and_timestamp() {
        let v = serde_json::to_value(Invalidation::new("/inventory/manage")).unwrap();
        assert_eq!(v["topic"], "/inventory/manage");
        assert!(v["issued_at"].is_string());
    }
}
