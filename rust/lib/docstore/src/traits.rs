use async_trait::async_trait;

use crate::document::{Document, Fields};
use crate::error::StoreError;
use crate::hub::Subscription;

/// A collection-of-documents store with live snapshot subscriptions.
///
/// Ids are assigned by the store on `create` and never change. Every
/// successful write publishes the full post-write content of the touched
/// collection to that collection's subscriptions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its store-assigned id.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Merge `fields` into an existing document. Fails with
    /// `StoreError::NotFound` if the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Remove a document. Removing a missing document succeeds and
    /// publishes nothing.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Open a live feed on `collection`. The current content is the first
    /// snapshot; dropping the subscription ends delivery.
    fn subscribe(&self, collection: &str) -> Result<Subscription, StoreError>;
}
