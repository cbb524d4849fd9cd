use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::document::{Document, Fields};
use crate::error::StoreError;
use crate::hub::Subscription;
use crate::traits::DocumentStore;

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
    Subscribe,
}

/// Wraps a store and injects failures and latency, for exercising the
/// failure and in-flight paths of callers.
///
/// Latency applies to the async operations only; `subscribe` stays
/// synchronous.
pub struct FaultyStore {
    inner: Arc<dyn DocumentStore>,
    failing: Mutex<HashSet<Operation>>,
    latency: Mutex<Duration>,
}

impl FaultyStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            failing: Mutex::new(HashSet::new()),
            latency: Mutex::new(Duration::ZERO),
        }
    }

    /// Make every later `op` fail with `StoreError::Unavailable`.
    pub fn fail(&self, op: Operation) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: Operation) {
        self.failing.lock().unwrap().remove(&op);
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    fn check(&self, op: Operation) -> Result<(), StoreError> {
        if self.failing.lock().unwrap().contains(&op) {
            debug!(?op, "injecting store failure");
            return Err(StoreError::Unavailable(format!("injected {:?} failure", op)));
        }
        Ok(())
    }

    async fn delay(&self) {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.delay().await;
        self.check(Operation::Create)?;
        self.inner.create(collection, fields).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.delay().await;
        self.check(Operation::Get)?;
        self.inner.get(collection, id).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.delay().await;
        self.check(Operation::Update)?;
        self.inner.update(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.delay().await;
        self.check(Operation::Delete)?;
        self.inner.delete(collection, id).await
    }

    fn subscribe(&self, collection: &str) -> Result<Subscription, StoreError> {
        self.check(Operation::Subscribe)?;
        self.inner.subscribe(collection)
    }
}
