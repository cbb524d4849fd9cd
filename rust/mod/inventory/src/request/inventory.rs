//! Inventory view requests.

use tienda_flux::Request;

use crate::draft::DraftField;

#[derive(Debug, Clone)]
pub struct SetFilterReq {
    pub text: String,
}

impl Request for SetFilterReq {
    const PATH: &'static str = "inventory/filter/set";
}

// ============================================================================
// Edit prompt
// ============================================================================

/// Open the edit prompt on a mirrored record.
#[derive(Debug, Clone)]
pub struct EditOpenReq {
    pub id: String,
}

impl Request for EditOpenReq {
    const PATH: &'static str = "inventory/edit/open";
}

#[derive(Debug, Clone)]
pub struct EditUpdateFieldReq {
    pub field: DraftField,
    pub value: String,
}

impl Request for EditUpdateFieldReq {
    const PATH: &'static str = "inventory/edit/update-field";
}

#[derive(Debug, Clone)]
pub struct EditToggleExpiryReq;

impl Request for EditToggleExpiryReq {
    const PATH: &'static str = "inventory/edit/toggle-expiry";
}

/// Write the edit buffer over the record.
#[derive(Debug, Clone)]
pub struct EditConfirmReq;

impl Request for EditConfirmReq {
    const PATH: &'static str = "inventory/edit/confirm";
}

#[derive(Debug, Clone)]
pub struct EditCancelReq;

impl Request for EditCancelReq {
    const PATH: &'static str = "inventory/edit/cancel";
}

// ============================================================================
// Delete prompt
// ============================================================================

#[derive(Debug, Clone)]
pub struct DeleteOpenReq {
    pub id: String,
}

impl Request for DeleteOpenReq {
    const PATH: &'static str = "inventory/delete/open";
}

#[derive(Debug, Clone)]
pub struct DeleteConfirmReq;

impl Request for DeleteConfirmReq {
    const PATH: &'static str = "inventory/delete/confirm";
}

/// Close the delete prompt. A delete already in flight still completes.
#[derive(Debug, Clone)]
pub struct DeleteCancelReq;

impl Request for DeleteCancelReq {
    const PATH: &'static str = "inventory/delete/cancel";
}
