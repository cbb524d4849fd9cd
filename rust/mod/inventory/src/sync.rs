use std::sync::Arc;

use chrono::Local;
use tienda_docstore::{Snapshot, StoreError, Subscription};
use tienda_flux::StateStore;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::binding::StoreBinding;
use crate::model::Record;
use crate::state::Mirror;

/// Keeps the `Mirror` in step with the product collection.
///
/// One task per mounted view consumes the subscription and replaces the
/// mirror with each snapshot. The subscription lives inside that task, so
/// stopping the task releases it.
pub struct MirrorSync {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl MirrorSync {
    /// Subscribe and apply the initial snapshot before returning, so the
    /// mirror is populated as soon as the view is mounted.
    pub async fn mount(binding: &StoreBinding, store: Arc<StateStore>) -> Result<Self, StoreError> {
        let mut subscription = binding.subscribe()?;
        if let Some(snapshot) = subscription.next().await {
            apply(&store, snapshot);
        }

        let (shutdown, stop) = oneshot::channel();
        let task = tokio::spawn(consume(subscription, store, stop));
        debug!(collection = binding.collection(), "inventory view mounted");

        Ok(Self {
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop consuming and wait until the subscription is released. No
    /// mirror update happens after this returns.
    pub async fn unmount(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "mirror task did not stop cleanly");
            }
        }
        debug!("inventory view unmounted");
    }
}

impl Drop for MirrorSync {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn consume(
    mut subscription: Subscription,
    store: Arc<StateStore>,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            snapshot = subscription.next() => match snapshot {
                Some(snapshot) => apply(&store, snapshot),
                None => {
                    debug!("snapshot feed closed");
                    break;
                }
            },
        }
    }
    subscription.unsubscribe();
}

/// Replace the mirror with `snapshot`. Documents that cannot be read as
/// products are skipped.
pub fn apply(store: &StateStore, snapshot: Snapshot) {
    let records = snapshot
        .documents
        .iter()
        .filter_map(|doc| match Record::from_document(doc) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(id = %doc.id, error = %e, "skipping unreadable product");
                None
            }
        })
        .collect();

    store.write(Mirror {
        records,
        sequence: snapshot.sequence,
        updated_at: Some(Local::now()),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use tienda_docstore::{Document, DocumentStore, MemoryStore};

    fn widget() -> Product {
        Product {
            name: "Widget".into(),
            sale_price: "9.99".into(),
            supplier_price: Some(3.5),
            quantity: Some(4),
            ..Product::default()
        }
    }

    fn setup() -> (Arc<MemoryStore>, StoreBinding, Arc<StateStore>) {
        let store = Arc::new(MemoryStore::new());
        let binding = StoreBinding::new(store.clone(), "productos");
        (store, binding, Arc::new(StateStore::new()))
    }

    async fn wait_for_sequence(state: &StateStore, at_least: u64) -> Mirror {
        for _ in 0..100 {
            if let Some(mirror) = state.read::<Mirror>() {
                if mirror.sequence >= at_least {
                    return mirror;
                }
            }
            tokio::task::yield_now().await;
        }
        panic!("mirror never reached sequence {}", at_least);
    }

    #[tokio::test]
    async fn mount_applies_initial_snapshot() {
        let (_store, binding, state) = setup();
        binding.create(&widget()).await.unwrap();

        let sync = MirrorSync::mount(&binding, state.clone()).await.unwrap();
        let mirror = state.read::<Mirror>().unwrap();
        assert_eq!(mirror.records.len(), 1);
        assert_eq!(mirror.records[0].product.name, "Widget");
        assert!(mirror.updated_at.is_some());
        assert!(sync.is_running());

        sync.unmount().await;
    }

    #[tokio::test]
    async fn writes_replace_the_mirror() {
        let (_store, binding, state) = setup();
        let sync = MirrorSync::mount(&binding, state.clone()).await.unwrap();
        let start = state.read::<Mirror>().unwrap().sequence;

        let id = binding.create(&widget()).await.unwrap();
        let mirror = wait_for_sequence(&state, start + 1).await;
        assert_eq!(mirror.records[0].id, id);

        binding.delete(&id).await.unwrap();
        let mirror = wait_for_sequence(&state, start + 2).await;
        assert!(mirror.records.is_empty());

        sync.unmount().await;
    }

    #[tokio::test]
    async fn unmount_releases_the_subscription() {
        let (store, binding, state) = setup();
        let sync = MirrorSync::mount(&binding, state.clone()).await.unwrap();
        assert_eq!(store.hub().subscriber_count("productos"), 1);

        sync.unmount().await;
        assert_eq!(store.hub().subscriber_count("productos"), 0);

        binding.create(&widget()).await.unwrap();
        tokio::task::yield_now().await;
        assert!(state.read::<Mirror>().unwrap().records.is_empty());
    }

    #[tokio::test]
    async fn drop_stops_the_task() {
        let (store, binding, state) = setup();
        let sync = MirrorSync::mount(&binding, state).await.unwrap();
        drop(sync);

        for _ in 0..100 {
            if store.hub().subscriber_count("productos") == 0 {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("subscription was not released after drop");
    }

    #[test]
    fn apply_skips_nothing_for_odd_fields() {
        let state = StateStore::new();
        let odd = serde_json::json!({"nombre": 5, "precio": "x"});
        apply(
            &state,
            Snapshot {
                collection: "productos".into(),
                sequence: 7,
                documents: vec![Document::new("a", odd.as_object().cloned().unwrap())],
            },
        );

        let mirror = state.read::<Mirror>().unwrap();
        assert_eq!(mirror.sequence, 7);
        assert_eq!(mirror.records[0].product.name, "5");
        assert_eq!(mirror.records[0].product.supplier_price, None);
    }

    #[tokio::test]
    async fn store_writes_outside_the_binding_are_seen() {
        let (store, binding, state) = setup();
        let sync = MirrorSync::mount(&binding, state.clone()).await.unwrap();

        store
            .create("productos", widget().to_fields().unwrap())
            .await
            .unwrap();
        let mirror = wait_for_sequence(&state, 1).await;
        assert_eq!(mirror.records.len(), 1);

        sync.unmount().await;
    }
}
