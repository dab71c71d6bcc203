//! Cache-coherence events.
//!
//! Mutations publish [`Invalidation`] messages on an [`EventBus`]; rendering or
//! caching layers subscribe and recompute the views named by each topic.

pub mod bus;
pub mod in_memory_bus;
pub mod invalidation;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use invalidation::{BusInvalidator, Invalidation, Invalidator};
