use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition};
use tracing::{info, warn};

use crate::document::{merge_fields, new_id, Document, Fields};
use crate::error::{check_collection, StoreError};
use crate::hub::{SnapshotHub, Subscription};
use crate::traits::DocumentStore;

/// Keys are `{collection}/{id}`, values are the JSON-encoded field map.
const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

/// `DocumentStore` persisted in a redb file.
///
/// Writes are serialized through `writer` so the snapshot published after a
/// commit is exactly the state that commit produced.
///
/// The trait methods are `async` but redb is not: each call runs its
/// transaction (and the fsync on commit) on the calling task. That suits
/// short-lived command sessions. A long-running runtime serving many
/// sessions should call it through `tokio::task::spawn_blocking`.
pub struct RedbDocumentStore {
    db: Database,
    writer: Mutex<()>,
    hub: SnapshotHub,
}

impl RedbDocumentStore {
    /// Open or create the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(StoreError::storage)?;

        // Create the table up front so readers never see it missing.
        let txn = db.begin_write().map_err(StoreError::storage)?;
        {
            txn.open_table(TABLE).map_err(StoreError::storage)?;
        }
        txn.commit().map_err(StoreError::storage)?;

        Ok(Self {
            db,
            writer: Mutex::new(()),
            hub: SnapshotHub::new(),
        })
    }

    pub fn hub(&self) -> &SnapshotHub {
        &self.hub
    }

    fn key(collection: &str, id: &str) -> String {
        format!("{}/{}", collection, id)
    }

    fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let prefix = format!("{}/", collection);
        let txn = self.db.begin_read().map_err(StoreError::storage)?;
        let table = txn.open_table(TABLE).map_err(StoreError::storage)?;

        let mut documents = Vec::new();
        for entry in table.range(prefix.as_str()..).map_err(StoreError::storage)? {
            let (key, value) = entry.map_err(StoreError::storage)?;
            let Some(id) = key.value().strip_prefix(prefix.as_str()) else {
                break;
            };
            documents.push(Document::new(id, decode(value.value())?));
        }
        Ok(documents)
    }

    /// Publish the committed content of `collection`. The write already
    /// succeeded, so a failed re-read is only logged.
    fn publish(&self, collection: &str) {
        match self.scan(collection) {
            Ok(documents) => {
                self.hub.publish(collection, documents);
            }
            Err(e) => warn!(collection, error = %e, "failed to read back collection for snapshot"),
        }
    }
}

fn encode(fields: &Fields) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(fields).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Fields, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[async_trait]
impl DocumentStore for RedbDocumentStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        check_collection(collection)?;
        let bytes = encode(&fields)?;
        let id = new_id();
        let key = Self::key(collection, &id);

        let _writer = self.writer.lock().unwrap();
        let txn = self.db.begin_write().map_err(StoreError::storage)?;
        {
            let mut table = txn.open_table(TABLE).map_err(StoreError::storage)?;
            table
                .insert(key.as_str(), bytes.as_slice())
                .map_err(StoreError::storage)?;
        }
        txn.commit().map_err(StoreError::storage)?;
        self.publish(collection);

        info!(collection, id = %id, "document created");
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        check_collection(collection)?;
        let key = Self::key(collection, id);
        let txn = self.db.begin_read().map_err(StoreError::storage)?;
        let table = txn.open_table(TABLE).map_err(StoreError::storage)?;

        match table.get(key.as_str()).map_err(StoreError::storage)? {
            Some(value) => Ok(Some(Document::new(id, decode(value.value())?))),
            None => Ok(None),
        }
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        check_collection(collection)?;
        let key = Self::key(collection, id);

        let _writer = self.writer.lock().unwrap();
        let txn = self.db.begin_write().map_err(StoreError::storage)?;
        {
            let mut table = txn.open_table(TABLE).map_err(StoreError::storage)?;
            let existing = table
                .get(key.as_str())
                .map_err(StoreError::storage)?
                .map(|value| value.value().to_vec());
            let Some(existing) = existing else {
                return Err(StoreError::not_found(collection, id));
            };

            let mut current = decode(&existing)?;
            merge_fields(&mut current, fields);
            let bytes = encode(&current)?;
            table
                .insert(key.as_str(), bytes.as_slice())
                .map_err(StoreError::storage)?;
        }
        txn.commit().map_err(StoreError::storage)?;
        self.publish(collection);

        info!(collection, id, "document updated");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        check_collection(collection)?;
        let key = Self::key(collection, id);

        let _writer = self.writer.lock().unwrap();
        let txn = self.db.begin_write().map_err(StoreError::storage)?;
        let removed = {
            let mut table = txn.open_table(TABLE).map_err(StoreError::storage)?;
            let removed = table
                .remove(key.as_str())
                .map_err(StoreError::storage)?
                .is_some();
            removed
        };
        txn.commit().map_err(StoreError::storage)?;

        if removed {
            self.publish(collection);
            info!(collection, id, "document deleted");
        }
        Ok(())
    }

    fn subscribe(&self, collection: &str) -> Result<Subscription, StoreError> {
        check_collection(collection)?;
        let _writer = self.writer.lock().unwrap();
        let current = self.scan(collection)?;
        Ok(self.hub.register(collection, current))
    }
}
