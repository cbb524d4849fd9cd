//! App lifecycle handlers.

use tienda_flux::StateStore;

use crate::state::*;

/// Handle `app/initialize`. The mirror is left alone; it belongs to the
/// snapshot consumer.
pub fn handle_initialize(store: &StateStore) {
    store.write(FormState::default());
    store.write(FilterText::default());
    store.write(ViewModal::Closed);
    store.write(ViewError::default());
    if store.read::<Mirror>().is_none() {
        store.write(Mirror::default());
    }
}
