//! Entry form requests.

use tienda_flux::Request;

use crate::draft::DraftField;

/// Replace one form field with the typed text.
#[derive(Debug, Clone)]
pub struct FormUpdateFieldReq {
    pub field: DraftField,
    pub value: String,
}

impl Request for FormUpdateFieldReq {
    const PATH: &'static str = "form/update-field";
}

#[derive(Debug, Clone)]
pub struct FormToggleExpiryReq;

impl Request for FormToggleExpiryReq {
    const PATH: &'static str = "form/toggle-expiry";
}

/// Save the form as a new product. Ignored while a save is in flight.
#[derive(Debug, Clone)]
pub struct SubmitReq;

impl Request for SubmitReq {
    const PATH: &'static str = "form/submit";
}
