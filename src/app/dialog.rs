//! Submission dialog state: draft, validation, and focus trap.
//!
//! Opening captures the page element that had focus so closing can hand it
//! back. The focusable set is derived from the current draft every time it is
//! asked for, so switching between single and two-part mode (or the submit
//! button becoming enabled) is always reflected in the trap.

use super::modes::DialogPhase;
use crate::domain::{JokeDraft, JokeKind};
use crate::infrastructure::{DialogElement, ElementId, FocusTarget};
use thiserror::Error;

/// Minimum trimmed length of a single joke.
pub const MIN_TEXT_CHARS: usize = 10;

/// Minimum trimmed length of each half of a two-part joke.
pub const MIN_PART_CHARS: usize = 5;

/// Message shown when the write fails for a reason the user cannot fix.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to add joke. Please try again.";

/// Why a draft cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Your joke must be at least 10 characters long.")]
    TextTooShort,

    #[error("Setup and punchline must each be at least 5 characters long.")]
    PartsTooShort,
}

fn trimmed_chars(value: &str) -> usize {
    value.trim().chars().count()
}

/// Checks the minimum lengths for the draft's kind.
///
/// # Errors
///
/// Returns the [`ValidationError`] describing the first unmet requirement.
///
/// # Examples
///
/// ```
/// use jokebox::app::validate_draft;
/// use jokebox::domain::JokeDraft;
///
/// assert!(validate_draft(&JokeDraft::single("123456789")).is_err());
/// assert!(validate_draft(&JokeDraft::single(" 1234567890 ")).is_ok());
/// ```
pub fn validate_draft(draft: &JokeDraft) -> Result<(), ValidationError> {
    match draft.kind {
        JokeKind::Single if trimmed_chars(&draft.text) < MIN_TEXT_CHARS => {
            Err(ValidationError::TextTooShort)
        }
        JokeKind::TwoPart
            if trimmed_chars(&draft.setup) < MIN_PART_CHARS
                || trimmed_chars(&draft.delivery) < MIN_PART_CHARS =>
        {
            Err(ValidationError::PartsTooShort)
        }
        _ => Ok(()),
    }
}

/// State of the submission dialog. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogState {
    pub visible: bool,
    pub draft: JokeDraft,
    pub submitting: bool,
    pub validation_error: Option<String>,

    /// Page element focused before the dialog opened.
    pub last_focused: Option<ElementId>,

    submission: u64,
}

impl DialogState {
    #[must_use]
    pub const fn phase(&self) -> DialogPhase {
        match (self.visible, self.submitting) {
            (false, _) => DialogPhase::Closed,
            (true, false) => DialogPhase::Open,
            (true, true) => DialogPhase::Submitting,
        }
    }

    /// Enter action: shows the dialog and remembers the focused page element.
    pub fn open(&mut self, focused: Option<ElementId>) {
        self.visible = true;
        self.last_focused = focused;
        tracing::debug!(captured = ?focused.map(|id| id.0), "dialog opened");
    }

    /// Exit action: resets to initial values and returns the element that
    /// should get focus back.
    pub fn close(&mut self) -> Option<ElementId> {
        let restore = self.last_focused.take();
        let submission = self.submission;
        *self = Self {
            submission,
            ..Self::default()
        };
        tracing::debug!(restore = ?restore.map(|id| id.0), "dialog closed");
        restore
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate_draft(&self.draft).is_ok()
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.visible && !self.submitting && self.is_valid()
    }

    /// Starts a submission and returns its id, or `None` when a submission is
    /// already running. Records the validation message when the draft is
    /// invalid.
    pub fn begin_submit(&mut self) -> Option<u64> {
        if !self.visible || self.submitting {
            tracing::debug!(submitting = self.submitting, "ignoring submit");
            return None;
        }

        if let Err(e) = validate_draft(&self.draft) {
            tracing::debug!(error = %e, "draft failed validation");
            self.validation_error = Some(e.to_string());
            return None;
        }

        self.submission += 1;
        self.submitting = true;
        self.validation_error = None;
        Some(self.submission)
    }

    /// True if `submission` is the one currently in progress.
    #[must_use]
    pub const fn is_current_submission(&self, submission: u64) -> bool {
        self.visible && self.submitting && self.submission == submission
    }

    /// Leaves the submitting phase with a retryable message.
    pub fn fail_submission(&mut self) {
        self.submitting = false;
        self.validation_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
    }

    /// Ordered focusable elements, in document order.
    #[must_use]
    pub fn focusable_elements(&self) -> Vec<DialogElement> {
        let mut elements = vec![
            DialogElement::CloseButton,
            DialogElement::KindSingle,
            DialogElement::KindTwoPart,
        ];

        match self.draft.kind {
            JokeKind::Single => elements.push(DialogElement::TextInput),
            JokeKind::TwoPart => {
                elements.push(DialogElement::SetupInput);
                elements.push(DialogElement::DeliveryInput);
            }
        }

        elements.push(DialogElement::CancelButton);
        if self.can_submit() {
            elements.push(DialogElement::SubmitButton);
        }
        elements
    }

    /// First text input for the current kind; receives focus on open.
    #[must_use]
    pub const fn initial_focus(&self) -> DialogElement {
        match self.draft.kind {
            JokeKind::Single => DialogElement::TextInput,
            JokeKind::TwoPart => DialogElement::SetupInput,
        }
    }

    /// Focus trap: where Tab should go instead of its default, if anywhere.
    ///
    /// Forward Tab on the last element wraps to the first; shift+Tab on the
    /// first wraps to the last. Any other position is left to default handling.
    #[must_use]
    pub fn trap_tab(&self, focused: Option<FocusTarget>, shift: bool) -> Option<DialogElement> {
        let elements = self.focusable_elements();
        let (first, last) = (*elements.first()?, *elements.last()?);
        let focused = focused?;

        if shift && focused == FocusTarget::Dialog(first) {
            Some(last)
        } else if !shift && focused == FocusTarget::Dialog(last) {
            Some(first)
        } else {
            None
        }
    }
}
