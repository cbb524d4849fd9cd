//! App lifecycle requests.

use tienda_flux::Request;

/// Reset every piece of form and view state.
#[derive(Debug, Clone)]
pub struct InitializeReq;

impl Request for InitializeReq {
    const PATH: &'static str = "app/initialize";
}
