//! Request handlers and Flux wiring.
//!
//! `register_handlers` binds each request type to its handler. Handlers get
//! the typed request, the state store and the shared `InventoryContext`.

pub mod app_handlers;
pub mod form_handlers;
pub mod view_handlers;

use std::sync::Arc;
use std::time::Duration;

use tienda_flux::{Flux, StateStore};

use crate::binding::StoreBinding;
use crate::request::*;

/// What handlers need beyond the state store.
pub struct InventoryContext {
    pub binding: StoreBinding,
    pub notice_ttl: Duration,
}

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<InventoryContext>) {
    // app/initialize
    flux.handle(|_: Arc<InitializeReq>, store: Arc<StateStore>| async move {
        app_handlers::handle_initialize(&store);
    });

    // form/*
    flux.handle(|req: Arc<FormUpdateFieldReq>, store: Arc<StateStore>| async move {
        form_handlers::handle_update_field(&req, &store);
    });
    flux.handle(|_: Arc<FormToggleExpiryReq>, store: Arc<StateStore>| async move {
        form_handlers::handle_toggle_expiry(&store);
    });
    {
        let ctx = ctx.clone();
        flux.handle(move |_: Arc<SubmitReq>, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                form_handlers::handle_submit(&store, &ctx).await;
            }
        });
    }

    // inventory/filter/set
    flux.handle(|req: Arc<SetFilterReq>, store: Arc<StateStore>| async move {
        view_handlers::handle_set_filter(&req, &store);
    });

    // inventory/edit/*
    flux.handle(|req: Arc<EditOpenReq>, store: Arc<StateStore>| async move {
        view_handlers::handle_edit_open(&req, &store);
    });
    flux.handle(|req: Arc<EditUpdateFieldReq>, store: Arc<StateStore>| async move {
        view_handlers::handle_edit_update_field(&req, &store);
    });
    flux.handle(|_: Arc<EditToggleExpiryReq>, store: Arc<StateStore>| async move {
        view_handlers::handle_edit_toggle_expiry(&store);
    });
    {
        let ctx = ctx.clone();
        flux.handle(move |_: Arc<EditConfirmReq>, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                view_handlers::handle_edit_confirm(&store, &ctx).await;
            }
        });
    }
    flux.handle(|_: Arc<EditCancelReq>, store: Arc<StateStore>| async move {
        view_handlers::handle_edit_cancel(&store);
    });

    // inventory/delete/*
    flux.handle(|req: Arc<DeleteOpenReq>, store: Arc<StateStore>| async move {
        view_handlers::handle_delete_open(&req, &store);
    });
    {
        let ctx = ctx.clone();
        flux.handle(move |_: Arc<DeleteConfirmReq>, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                view_handlers::handle_delete_confirm(&store, &ctx).await;
            }
        });
    }
    flux.handle(|_: Arc<DeleteCancelReq>, store: Arc<StateStore>| async move {
        view_handlers::handle_delete_cancel(&store);
    });
}
