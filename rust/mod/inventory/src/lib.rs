//! Inventory form and live inventory view.
//!
//! Structure:
//! - `model` / `draft`: product records, their stored shape, and the
//!   string-typed buffer behind the form and the edit prompt.
//! - `state/`: state types held in the Flux store.
//! - `request/`: request types dispatched through the Flux router.
//! - `handlers/`: request handlers and their registration.
//! - `sync`: the snapshot consumer that keeps the mirror current.
//! - `view` / `render`: derived view model and its text layouts.
//! - `app`: `InventoryApp`, the handle that wires it all together.

pub mod app;
pub mod binding;
pub mod config;
pub mod draft;
pub mod format;
pub mod handlers;
pub mod model;
pub mod render;
pub mod request;
pub mod state;
pub mod sync;
pub mod view;

pub use app::InventoryApp;
pub use binding::StoreBinding;
pub use config::InventoryConfig;
pub use draft::{DraftField, ProductDraft};
pub use model::{Product, Record};
pub use render::Layout;
pub use view::InventoryView;
