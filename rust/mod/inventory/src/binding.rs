use std::sync::Arc;

use tienda_docstore::{DocumentStore, StoreError, Subscription};

use crate::model::Product;

/// Typed handle on the product collection.
///
/// Products go in and out through the stored-field mapping in
/// [`Product::to_fields`]; callers never see stored field names.
#[derive(Clone)]
pub struct StoreBinding {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl StoreBinding {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn create(&self, product: &Product) -> Result<String, StoreError> {
        self.store
            .create(&self.collection, product.to_fields()?)
            .await
    }

    /// Rewrite every field of `id`.
    pub async fn update(&self, id: &str, product: &Product) -> Result<(), StoreError> {
        self.store
            .update(&self.collection, id, product.to_fields()?)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(&self.collection, id).await
    }

    pub fn subscribe(&self) -> Result<Subscription, StoreError> {
        self.store.subscribe(&self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tienda_docstore::MemoryStore;

    fn widget() -> Product {
        Product {
            name: "Widget".into(),
            sale_price: "9.99".into(),
            supplier_price: Some(3.5),
            quantity: Some(4),
            ..Product::default()
        }
    }

    #[tokio::test]
    async fn create_writes_legacy_fields() {
        let store = Arc::new(MemoryStore::new());
        let binding = StoreBinding::new(store.clone(), "productos");

        let id = binding.create(&widget()).await.unwrap();
        let doc = store.get("productos", &id).await.unwrap().unwrap();
        assert_eq!(doc.get("descripcion"), Some(&json!("9.99")));
        assert_eq!(doc.get("precio"), Some(&json!(3.5)));
        assert!(doc.get("salePrice").is_none());
    }

    #[tokio::test]
    async fn update_rewrites_all_fields() {
        let store = Arc::new(MemoryStore::new());
        let binding = StoreBinding::new(store.clone(), "productos");
        let id = binding.create(&widget()).await.unwrap();

        let mut edited = widget();
        edited.quantity = None;
        binding.update(&id, &edited).await.unwrap();

        let doc = store.get("productos", &id).await.unwrap().unwrap();
        assert_eq!(doc.get("cantidad"), Some(&serde_json::Value::Null));
        assert_eq!(doc.get("nombre"), Some(&json!("Widget")));
    }
}
