//! Inventory view state: the mirror, the filter, the open prompt and the
//! last failure.

use chrono::{DateTime, Local};
use tienda_flux::State;

use crate::draft::ProductDraft;
use crate::model::{Record, inventory_total};

/// Local copy of the whole collection, replaced on every snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mirror {
    pub records: Vec<Record>,
    pub sequence: u64,
    pub updated_at: Option<DateTime<Local>>,
}

impl State for Mirror {
    const PATH: &'static str = "inventory/mirror";
}

impl Mirror {
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Total over every record, whatever the filter.
    pub fn total(&self) -> f64 {
        inventory_total(&self.records)
    }
}

/// Name filter text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterText(pub String);

impl State for FilterText {
    const PATH: &'static str = "inventory/filter";
}

/// The prompt currently open over the inventory view. At most one.
///
/// `pending` is set while the confirmed write is in flight; a prompt closes
/// when its write succeeds and stays open when it fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewModal {
    #[default]
    Closed,
    ConfirmingDelete {
        id: String,
        pending: bool,
    },
    Editing {
        original: Record,
        buffer: ProductDraft,
        pending: bool,
    },
}

impl State for ViewModal {
    const PATH: &'static str = "inventory/modal";
}

impl ViewModal {
    pub fn is_open(&self) -> bool {
        !matches!(self, ViewModal::Closed)
    }

    pub fn is_pending(&self) -> bool {
        match self {
            ViewModal::Closed => false,
            ViewModal::ConfirmingDelete { pending, .. } | ViewModal::Editing { pending, .. } => {
                *pending
            }
        }
    }

    /// Id of the record the prompt is about.
    pub fn target(&self) -> Option<&str> {
        match self {
            ViewModal::Closed => None,
            ViewModal::ConfirmingDelete { id, .. } => Some(id),
            ViewModal::Editing { original, .. } => Some(&original.id),
        }
    }
}

/// Last failed update or delete, shown under the view until the next
/// successful write or prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewError(pub Option<String>);

impl State for ViewError {
    const PATH: &'static str = "inventory/error";
}
