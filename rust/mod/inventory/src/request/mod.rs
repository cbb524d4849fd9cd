//! Request definitions.
//!
//! Each request type is dispatched to the handler registered at its `PATH`.

pub mod app;
pub mod form;
pub mod inventory;

pub use app::InitializeReq;
pub use form::{FormToggleExpiryReq, FormUpdateFieldReq, SubmitReq};
pub use inventory::{
    DeleteCancelReq, DeleteConfirmReq, DeleteOpenReq, EditCancelReq, EditConfirmReq,
    EditOpenReq, EditToggleExpiryReq, EditUpdateFieldReq, SetFilterReq,
};
