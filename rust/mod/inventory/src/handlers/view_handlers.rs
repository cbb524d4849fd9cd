//! Inventory view handlers: filter, edit prompt, delete prompt.

use std::sync::Arc;

use tienda_flux::StateStore;
use tracing::{debug, error, info, warn};

use crate::draft::ProductDraft;
use crate::handlers::InventoryContext;
use crate::request::{DeleteOpenReq, EditOpenReq, EditUpdateFieldReq, SetFilterReq};
use crate::state::{FilterText, Mirror, ViewError, ViewModal};

/// Handle `inventory/filter/set`.
pub fn handle_set_filter(req: &SetFilterReq, store: &StateStore) {
    store.write(FilterText(req.text.clone()));
}

// ============================================================================
// Edit
// ============================================================================

/// Handle `inventory/edit/open`. Replaces whatever prompt was open.
pub fn handle_edit_open(req: &EditOpenReq, store: &StateStore) {
    let record = store
        .read::<Mirror>()
        .and_then(|mirror| mirror.find(&req.id).cloned());
    let Some(record) = record else {
        warn!(id = %req.id, "edit requested for a record that is not loaded");
        store.write(ViewError(Some(format!("Product {} not found", req.id))));
        return;
    };

    store.write(ViewError::default());
    store.write(ViewModal::Editing {
        buffer: ProductDraft::from_product(&record.product),
        original: record,
        pending: false,
    });
}

/// Handle `inventory/edit/update-field`. Only the buffer changes.
pub fn handle_edit_update_field(req: &EditUpdateFieldReq, store: &StateStore) {
    store.update(|modal: &mut ViewModal| {
        if let ViewModal::Editing { buffer, .. } = modal {
            buffer.set(req.field, req.value.clone());
        }
    });
}

/// Handle `inventory/edit/toggle-expiry`.
pub fn handle_edit_toggle_expiry(store: &StateStore) {
    store.update(|modal: &mut ViewModal| {
        if let ViewModal::Editing { buffer, .. } = modal {
            buffer.toggle_expiry();
        }
    });
}

/// Handle `inventory/edit/confirm`.
///
/// Writes every field of the buffer over the record. The prompt closes on
/// success and stays open, with the error shown, on failure.
pub async fn handle_edit_confirm(store: &Arc<StateStore>, ctx: &InventoryContext) {
    let target = store.update(|modal: &mut ViewModal| match modal {
        ViewModal::Editing {
            original,
            buffer,
            pending,
        } if !*pending => {
            *pending = true;
            Some((original.id.clone(), buffer.to_product()))
        }
        _ => None,
    });
    let Some((id, product)) = target else {
        debug!("edit confirm ignored, no idle edit prompt");
        return;
    };

    let result = ctx.binding.update(&id, &product).await;
    settle(store, &id, result.is_ok());

    match result {
        Ok(()) => {
            info!(id = %id, "product updated");
            store.write(ViewError::default());
        }
        Err(e) => {
            error!(id = %id, error = %e, "failed to update product");
            store.write(ViewError(Some(format!("Error updating the product: {}", e))));
        }
    }
}

/// Handle `inventory/edit/cancel`. Discards the buffer without writing.
pub fn handle_edit_cancel(store: &StateStore) {
    store.update(|modal: &mut ViewModal| {
        if matches!(modal, ViewModal::Editing { .. }) {
            *modal = ViewModal::Closed;
        }
    });
}

// ============================================================================
// Delete
// ============================================================================

/// Handle `inventory/delete/open`. Replaces whatever prompt was open.
pub fn handle_delete_open(req: &DeleteOpenReq, store: &StateStore) {
    store.write(ViewError::default());
    store.write(ViewModal::ConfirmingDelete {
        id: req.id.clone(),
        pending: false,
    });
}

/// Handle `inventory/delete/confirm`.
pub async fn handle_delete_confirm(store: &Arc<StateStore>, ctx: &InventoryContext) {
    let target = store.update(|modal: &mut ViewModal| match modal {
        ViewModal::ConfirmingDelete { id, pending } if !*pending => {
            *pending = true;
            Some(id.clone())
        }
        _ => None,
    });
    let Some(id) = target else {
        debug!("delete confirm ignored, no idle delete prompt");
        return;
    };

    let result = ctx.binding.delete(&id).await;
    settle(store, &id, result.is_ok());

    match result {
        Ok(()) => {
            info!(id = %id, "product deleted");
            store.write(ViewError::default());
        }
        Err(e) => {
            error!(id = %id, error = %e, "failed to delete product");
            store.write(ViewError(Some(format!("Error deleting the product: {}", e))));
        }
    }
}

/// Handle `inventory/delete/cancel`. An in-flight delete is not cancelled.
pub fn handle_delete_cancel(store: &StateStore) {
    store.update(|modal: &mut ViewModal| {
        if matches!(modal, ViewModal::ConfirmingDelete { .. }) {
            *modal = ViewModal::Closed;
        }
    });
}

/// Resolve the pending prompt for `id` once its write has finished. A prompt
/// that was cancelled or replaced meanwhile is left as it is.
fn settle(store: &StateStore, id: &str, ok: bool) {
    store.update(|modal: &mut ViewModal| {
        if !(modal.is_pending() && modal.target() == Some(id)) {
            return;
        }
        if ok {
            *modal = ViewModal::Closed;
            return;
        }
        match modal {
            ViewModal::ConfirmingDelete { pending, .. } | ViewModal::Editing { pending, .. } => {
                *pending = false;
            }
            ViewModal::Closed => {}
        }
    });
}
