//! # Storage-Change Notifications
//!
//! A storage backend publishes a `StorageEvent` for every key it writes or
//! removes. Each mounted store holds its own subscription and reacts to
//! changes of the identity-relevant keys by reloading its partition. This is
//! the cross-tab channel: two stores sharing one backend see each other's
//! session changes.
//!
//! Events are broadcast with `tokio::sync::broadcast`, so every subscriber
//! receives a copy. Subscribers that fall behind the channel capacity get a
//! single "unknown key" event instead of the events they missed.
//!
//! ```rust
//! use storefront::wishlist::sync::StorageEvents;
//!
//! let events = StorageEvents::new(16);
//! let mut sub = events.subscribe();
//! events.publish("token");
//! assert_eq!(sub.drain().len(), 1);
//! ```

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Default channel capacity
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// A key changed in durable storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Changed key; `None` when the whole store was cleared or events were missed
    pub key: Option<String>,
}

impl StorageEvent {
    pub fn changed(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    /// Event whose key is unknown
    pub fn cleared() -> Self {
        Self { key: None }
    }

    /// Whether this event may concern any of `keys`
    pub fn touches(&self, keys: &[&str]) -> bool {
        match &self.key {
            Some(key) => keys.contains(&key.as_str()),
            None => true,
        }
    }
}

/// Broadcast bus shared by a storage backend and its subscribers
#[derive(Debug, Clone)]
pub struct StorageEvents {
    tx: broadcast::Sender<StorageEvent>,
}

impl StorageEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish a key change. Returns the number of subscribers reached.
    pub fn publish(&self, key: impl Into<String>) -> usize {
        self.send(StorageEvent::changed(key))
    }

    /// Publish a whole-store change
    pub fn publish_cleared(&self) -> usize {
        self.send(StorageEvent::cleared())
    }

    fn send(&self, event: StorageEvent) -> usize {
        match self.tx.send(event) {
            Ok(count) => {
                tracing::trace!("[STORAGE] Change event delivered to {} subscribers", count);
                count
            }
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self) -> StorageSubscription {
        StorageSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for StorageEvents {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// One subscriber's view of the bus
#[derive(Debug)]
pub struct StorageSubscription {
    rx: broadcast::Receiver<StorageEvent>,
}

impl StorageSubscription {
    /// Take every event queued so far without blocking
    pub fn drain(&mut self) -> Vec<StorageEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!("[STORAGE] Subscriber lagged, {} change events dropped", missed);
                    events.push(StorageEvent::cleared());
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        events
    }

    /// Wait for the next event. `None` once every publisher is gone.
    pub async fn next(&mut self) -> Option<StorageEvent> {
        match self.rx.recv().await {
            Ok(event) => Some(event),
            Err(RecvError::Lagged(missed)) => {
                tracing::warn!("[STORAGE] Subscriber lagged, {} change events dropped", missed);
                Some(StorageEvent::cleared())
            }
            Err(RecvError::Closed) => None,
        }
    }
}
