use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::mpsc;
use tracing::debug;

use crate::document::{Document, Snapshot};

struct Subscriber {
    id: u64,
    tx: mpsc::UnboundedSender<Snapshot>,
}

#[derive(Default)]
struct Registry {
    collections: Mutex<HashMap<String, Vec<Subscriber>>>,
    next_id: AtomicU64,
    sequence: AtomicU64,
}

/// Fans collection snapshots out to live subscriptions.
///
/// Stores call `register` and `publish` while holding their own write
/// exclusion, so every subscriber sees snapshots in write order and never
/// misses a write that happened after its initial snapshot.
#[derive(Clone, Default)]
pub struct SnapshotHub {
    registry: Arc<Registry>,
}

impl SnapshotHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a subscription on `collection` whose first snapshot is `current`.
    pub fn register(&self, collection: &str, current: Vec<Document>) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        let mut collections = self.registry.collections.lock().unwrap();
        let initial = Snapshot {
            collection: collection.to_string(),
            sequence: self.registry.sequence.load(Ordering::Relaxed),
            documents: current,
        };
        // The receiver is still in hand, so this send cannot fail.
        let _ = tx.send(initial);
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Subscriber { id, tx });
        debug!(collection, subscription = id, "subscription opened");

        Subscription {
            id,
            collection: collection.to_string(),
            rx,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `documents` as the new content of `collection` to every live
    /// subscriber. Returns the snapshot's sequence number.
    pub fn publish(&self, collection: &str, documents: Vec<Document>) -> u64 {
        let mut collections = self.registry.collections.lock().unwrap();
        let sequence = self.registry.sequence.fetch_add(1, Ordering::Relaxed) + 1;

        let emptied = match collections.get_mut(collection) {
            Some(subscribers) => {
                subscribers.retain(|s| {
                    s.tx.send(Snapshot {
                        collection: collection.to_string(),
                        sequence,
                        documents: documents.clone(),
                    })
                    .is_ok()
                });
                subscribers.is_empty()
            }
            None => false,
        };
        if emptied {
            collections.remove(collection);
        }
        sequence
    }

    pub fn subscriber_count(&self, collection: &str) -> usize {
        self.registry
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

/// A live feed of snapshots for one collection.
///
/// The first snapshot is available immediately. Delivery stops when the
/// subscription is dropped or `unsubscribe` is called; either way the hub
/// forgets it exactly once.
pub struct Subscription {
    id: u64,
    collection: String,
    rx: mpsc::UnboundedReceiver<Snapshot>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Wait for the next snapshot. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }

    /// The next snapshot if one is already queued.
    pub fn try_next(&mut self) -> Option<Snapshot> {
        self.rx.try_recv().ok()
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.rx.close();
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut collections) = registry.collections.lock() else {
            return;
        };
        if let Some(subscribers) = collections.get_mut(&self.collection) {
            subscribers.retain(|s| s.id != self.id);
            if subscribers.is_empty() {
                collections.remove(&self.collection);
            }
        }
        debug!(collection = %self.collection, subscription = self.id, "subscription closed");
    }
}
