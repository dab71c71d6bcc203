//! Publish/subscribe abstraction (mechanics only).
//!
//! The bus distributes messages to every live subscriber. It carries no
//! persistence and makes no delivery promise beyond best-effort fan-out:
//! a subscriber that joins late misses earlier messages, and a subscriber
//! that has gone away is silently dropped.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to a bus.
///
/// Each subscription receives its own copy of every message published after
/// it was created, in publication order for a single publisher. It is meant
/// to be drained by one consumer thread.
///
/// ```ignore
/// let sub = bus.subscribe();
/// while let Ok(msg) = sub.recv() {
///     handle(msg);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every message already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Transport-agnostic pub/sub bus.
///
/// Implementations must be shareable across threads; `publish` may be called
/// concurrently from request handlers.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
