//! State definitions.
//!
//! Each type lives at a well-known path in the Flux store.

pub mod form;
pub mod inventory;

pub use form::{FormPhase, FormState, Notice, NoticeKind};
pub use inventory::{FilterText, Mirror, ViewError, ViewModal};
