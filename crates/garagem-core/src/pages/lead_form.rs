// ── Lead capture form ──
//
// Phase machine for the three capture flows. The variant is fixed by the
// draft; the form only tracks the submit lifecycle. A success banner is
// shown for a fixed interval and then dismissed.

use std::time::Duration;

use crate::catalog::CatalogStore;
use crate::model::LeadDraft;

/// How long the success banner stays up before the UI dismisses it.
pub const SUCCESS_DISMISS: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Success,
}

/// Submit lifecycle of one lead capture form.
#[derive(Debug, Default)]
pub struct LeadCaptureForm {
    phase: FormPhase,
}

impl LeadCaptureForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Submit the draft. On success the form moves to `Success` (the UI
    /// schedules a dismissal after [`SUCCESS_DISMISS`]); on failure it
    /// returns to `Editing` with the visitor's input intact, and the
    /// caller surfaces the failure.
    pub async fn submit(&mut self, store: &CatalogStore, draft: &LeadDraft) -> bool {
        self.phase = FormPhase::Submitting;
        match store.create_lead(draft).await {
            Some(_) => {
                self.phase = FormPhase::Success;
                true
            }
            None => {
                self.phase = FormPhase::Editing;
                false
            }
        }
    }

    /// Dismiss the success banner, returning the form to a fresh
    /// editing state.
    pub fn dismiss(&mut self) {
        if self.phase == FormPhase::Success {
            self.phase = FormPhase::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_only_applies_after_success() {
        let mut form = LeadCaptureForm::new();
        form.dismiss();
        assert_eq!(form.phase(), FormPhase::Editing);

        form.phase = FormPhase::Success;
        form.dismiss();
        assert_eq!(form.phase(), FormPhase::Editing);
    }
}
