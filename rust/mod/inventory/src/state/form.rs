//! Entry form state: stored at `form/state`.

use tienda_flux::State;

use crate::draft::ProductDraft;

pub const SAVED_MESSAGE: &str = "Product saved successfully";
pub const SAVE_FAILED_MESSAGE: &str = "Error saving the product";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message shown after a submission.
///
/// `serial` tells notices apart so an expiry timer only clears the notice it
/// was started for.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub serial: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    ShowingNotice(Notice),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: ProductDraft,
    pub phase: FormPhase,
    pub next_serial: u64,
}

impl State for FormState {
    const PATH: &'static str = "form/state";
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn notice(&self) -> Option<&Notice> {
        match &self.phase {
            FormPhase::ShowingNotice(notice) => Some(notice),
            _ => None,
        }
    }

    pub fn total_price(&self) -> f64 {
        self.draft.total_price()
    }

    /// Move to `Submitting` and hand back the draft to submit, unless a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<ProductDraft> {
        if self.is_submitting() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some(self.draft.clone())
    }

    /// Leave `Submitting` with a notice. Success also clears the draft.
    /// Returns the notice serial.
    pub fn finish_submit(&mut self, ok: bool) -> u64 {
        self.next_serial += 1;
        let (kind, message) = if ok {
            self.draft = ProductDraft::default();
            (NoticeKind::Success, SAVED_MESSAGE)
        } else {
            (NoticeKind::Error, SAVE_FAILED_MESSAGE)
        };
        self.phase = FormPhase::ShowingNotice(Notice {
            kind,
            message: message.to_string(),
            serial: self.next_serial,
        });
        self.next_serial
    }

    /// Clear the notice with `serial` if it is still the one showing.
    pub fn expire_notice(&mut self, serial: u64) -> bool {
        match &self.phase {
            FormPhase::ShowingNotice(notice) if notice.serial == serial => {
                self.phase = FormPhase::Idle;
                true
            }
            _ => false,
        }
    }
}
