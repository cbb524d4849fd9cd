use std::sync::Arc;

use tienda_docstore::{DocumentStore, StoreError};
use tienda_flux::{Flux, Request};

use crate::binding::StoreBinding;
use crate::config::InventoryConfig;
use crate::draft::DraftField;
use crate::handlers::{register_handlers, InventoryContext};
use crate::model::Record;
use crate::render::{self, Layout};
use crate::request::*;
use crate::state::{FilterText, FormState, Mirror, ViewError, ViewModal};
use crate::sync::MirrorSync;
use crate::view::InventoryView;

/// The entry form and the inventory view over one store.
///
/// ```ignore
/// let mut app = InventoryApp::new(store, InventoryConfig::default());
/// app.initialize().await;
/// app.mount().await?;
/// app.form_set(DraftField::Name, "Widget").await;
/// app.submit().await;
/// println!("{}", app.render_inventory(Layout::Table));
/// app.unmount().await;
/// ```
pub struct InventoryApp {
    flux: Flux,
    ctx: Arc<InventoryContext>,
    sync: Option<MirrorSync>,
}

impl InventoryApp {
    pub fn new(store: Arc<dyn DocumentStore>, config: InventoryConfig) -> Self {
        let flux = Flux::new();
        let ctx = Arc::new(InventoryContext {
            binding: StoreBinding::new(store, config.collection),
            notice_ttl: config.notice_ttl,
        });
        register_handlers(&flux, ctx.clone());
        Self {
            flux,
            ctx,
            sync: None,
        }
    }

    pub fn flux(&self) -> &Flux {
        &self.flux
    }

    pub fn binding(&self) -> &StoreBinding {
        &self.ctx.binding
    }

    /// Dispatch a request and wait for its handler.
    pub async fn request<R: Request>(&self, req: R) -> usize {
        self.flux.request(req).await
    }

    pub async fn initialize(&self) {
        self.request(InitializeReq).await;
    }

    // ====================================================================
    // View lifecycle
    // ====================================================================

    /// Start mirroring the collection. Mounting twice is a no-op.
    pub async fn mount(&mut self) -> Result<(), StoreError> {
        if self.sync.is_none() {
            let sync = MirrorSync::mount(&self.ctx.binding, self.flux.store().clone()).await?;
            self.sync = Some(sync);
        }
        Ok(())
    }

    pub async fn unmount(&mut self) {
        if let Some(sync) = self.sync.take() {
            sync.unmount().await;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.sync.is_some()
    }

    // ====================================================================
    // Form
    // ====================================================================

    pub async fn form_set(&self, field: DraftField, value: impl Into<String>) {
        self.request(FormUpdateFieldReq {
            field,
            value: value.into(),
        })
        .await;
    }

    pub async fn form_toggle_expiry(&self) {
        self.request(FormToggleExpiryReq).await;
    }

    pub async fn submit(&self) {
        self.request(SubmitReq).await;
    }

    // ====================================================================
    // View
    // ====================================================================

    pub async fn set_filter(&self, text: impl Into<String>) {
        self.request(SetFilterReq { text: text.into() }).await;
    }

    pub async fn open_edit(&self, id: impl Into<String>) {
        self.request(EditOpenReq { id: id.into() }).await;
    }

    pub async fn edit_set(&self, field: DraftField, value: impl Into<String>) {
        self.request(EditUpdateFieldReq {
            field,
            value: value.into(),
        })
        .await;
    }

    pub async fn edit_toggle_expiry(&self) {
        self.request(EditToggleExpiryReq).await;
    }

    pub async fn confirm_edit(&self) {
        self.request(EditConfirmReq).await;
    }

    pub async fn cancel_edit(&self) {
        self.request(EditCancelReq).await;
    }

    pub async fn open_delete(&self, id: impl Into<String>) {
        self.request(DeleteOpenReq { id: id.into() }).await;
    }

    pub async fn confirm_delete(&self) {
        self.request(DeleteConfirmReq).await;
    }

    pub async fn cancel_delete(&self) {
        self.request(DeleteCancelReq).await;
    }

    // ====================================================================
    // Reads
    // ====================================================================

    pub fn form(&self) -> FormState {
        self.flux.read::<FormState>().unwrap_or_default()
    }

    pub fn mirror(&self) -> Mirror {
        self.flux.read::<Mirror>().unwrap_or_default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.mirror().records
    }

    pub fn filter(&self) -> String {
        self.flux.read::<FilterText>().unwrap_or_default().0
    }

    pub fn modal(&self) -> ViewModal {
        self.flux.read::<ViewModal>().unwrap_or_default()
    }

    pub fn error(&self) -> Option<String> {
        self.flux.read::<ViewError>().unwrap_or_default().0
    }

    pub fn view(&self) -> InventoryView {
        InventoryView::build(&self.mirror(), &self.filter())
    }

    /// Records that pass the current filter.
    pub fn visible_records(&self) -> Vec<Record> {
        let filter = self.filter();
        self.records()
            .into_iter()
            .filter(|r| crate::view::matches_filter(&r.product.name, &filter))
            .collect()
    }

    // ====================================================================
    // Rendering
    // ====================================================================

    pub fn render_form(&self) -> String {
        render::render_form(&self.form())
    }

    /// The inventory view, followed by the open prompt and the last error.
    pub fn render_inventory(&self, layout: Layout) -> String {
        let mut out = render::render_inventory(&self.view(), layout);
        let modal = render::render_modal(&self.modal());
        if !modal.is_empty() {
            out.push('\n');
            out.push_str(&modal);
        }
        out.push_str(&render::render_error(self.error().as_deref()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tienda_docstore::MemoryStore;
    use tienda_flux::State;

    #[tokio::test]
    async fn initialize_sets_every_state() {
        let app = InventoryApp::new(Arc::new(MemoryStore::new()), InventoryConfig::default());
        app.initialize().await;

        let store = app.flux().store();
        for path in [
            FormState::PATH,
            FilterText::PATH,
            ViewModal::PATH,
            ViewError::PATH,
            Mirror::PATH,
        ] {
            assert!(store.contains(path), "missing {}", path);
        }
        assert_eq!(store.scan("inventory/").len(), 4);
    }

    #[tokio::test]
    async fn every_request_has_a_handler() {
        let app = InventoryApp::new(Arc::new(MemoryStore::new()), InventoryConfig::default());
        for path in [
            InitializeReq::PATH,
            FormUpdateFieldReq::PATH,
            FormToggleExpiryReq::PATH,
            SubmitReq::PATH,
            SetFilterReq::PATH,
            EditOpenReq::PATH,
            EditUpdateFieldReq::PATH,
            EditToggleExpiryReq::PATH,
            EditConfirmReq::PATH,
            EditCancelReq::PATH,
            DeleteOpenReq::PATH,
            DeleteConfirmReq::PATH,
            DeleteCancelReq::PATH,
        ] {
            assert!(app.flux().has_handler(path), "no handler for {}", path);
        }
    }

    #[tokio::test]
    async fn mount_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let mut app = InventoryApp::new(store.clone(), InventoryConfig::default());
        app.mount().await.unwrap();
        app.mount().await.unwrap();
        assert!(app.is_mounted());
        assert_eq!(store.hub().subscriber_count("productos"), 1);

        app.unmount().await;
        assert!(!app.is_mounted());
        assert_eq!(store.hub().subscriber_count("productos"), 0);
    }
}
