//! Entry form handlers.

use std::sync::Arc;
use std::time::Duration;

use tienda_flux::StateStore;
use tracing::{debug, error, info};

use crate::handlers::InventoryContext;
use crate::request::FormUpdateFieldReq;
use crate::state::FormState;

/// Handle `form/update-field`.
pub fn handle_update_field(req: &FormUpdateFieldReq, store: &StateStore) {
    store.update(|form: &mut FormState| form.draft.set(req.field, req.value.clone()));
}

/// Handle `form/toggle-expiry`.
pub fn handle_toggle_expiry(store: &StateStore) {
    store.update(|form: &mut FormState| form.draft.toggle_expiry());
}

/// Handle `form/submit`.
///
/// Creates the product, then shows a notice that clears itself after the
/// configured lifetime.
pub async fn handle_submit(store: &Arc<StateStore>, ctx: &InventoryContext) {
    let Some(draft) = store.update(|form: &mut FormState| form.begin_submit()) else {
        debug!("submit ignored, a save is already in flight");
        return;
    };

    let result = ctx.binding.create(&draft.to_product()).await;
    let serial = store.update(|form: &mut FormState| form.finish_submit(result.is_ok()));

    match result {
        Ok(id) => info!(id = %id, name = %draft.name, "product saved"),
        Err(e) => error!(error = %e, "failed to save product"),
    }

    expire_notice_after(Arc::clone(store), serial, ctx.notice_ttl);
}

fn expire_notice_after(store: Arc<StateStore>, serial: u64, ttl: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        store.update(|form: &mut FormState| form.expire_notice(serial));
    });
}
