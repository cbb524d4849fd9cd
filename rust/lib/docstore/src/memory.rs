use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::info;

use crate::document::{merge_fields, new_id, Document, Fields};
use crate::error::{check_collection, StoreError};
use crate::hub::{SnapshotHub, Subscription};
use crate::traits::DocumentStore;

type Collection = BTreeMap<String, Fields>;

/// In-process `DocumentStore`. Nothing survives the process.
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Collection>>,
    hub: SnapshotHub,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(BTreeMap::new()),
            hub: SnapshotHub::new(),
        }
    }

    pub fn hub(&self) -> &SnapshotHub {
        &self.hub
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn documents(collection: &Collection) -> Vec<Document> {
    collection
        .iter()
        .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
        .collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        check_collection(collection)?;
        let id = new_id();
        let mut collections = self.collections.write().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        docs.insert(id.clone(), fields);
        self.hub.publish(collection, documents(docs));
        info!(collection, id = %id, "document created");
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        check_collection(collection)?;
        let collections = self.collections.read().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        check_collection(collection)?;
        let mut collections = self.collections.write().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Err(StoreError::not_found(collection, id));
        };
        let Some(current) = docs.get_mut(id) else {
            return Err(StoreError::not_found(collection, id));
        };
        merge_fields(current, fields);
        self.hub.publish(collection, documents(docs));
        info!(collection, id, "document updated");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        check_collection(collection)?;
        let mut collections = self.collections.write().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(());
        };
        if docs.remove(id).is_some() {
            self.hub.publish(collection, documents(docs));
            info!(collection, id, "document deleted");
        }
        Ok(())
    }

    fn subscribe(&self, collection: &str) -> Result<Subscription, StoreError> {
        check_collection(collection)?;
        let collections = self.collections.read().unwrap();
        let current = collections.get(collection).map(documents).unwrap_or_default();
        Ok(self.hub.register(collection, current))
    }
}
