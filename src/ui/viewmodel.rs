//! View model types representing renderable controller state.
//!
//! This module defines immutable view models computed from application state.
//! They are what the controller publishes to presentation: the merged display
//! list, search progress, the dialog surface, and the visible notification.
//! View models contain no business logic, only display-ready data.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` after every
//! event that changed state, and published on a `tokio::sync::watch` channel.
//!
//! # Example
//!
//! ```rust
//! use jokebox::ui::{EmptyState, ViewModel};
//!
//! let vm = ViewModel {
//!     empty_state: Some(EmptyState::no_jokes()),
//!     ..ViewModel::default()
//! };
//! assert!(vm.items.is_empty());
//! ```

use crate::app::SearchStatus;
use crate::domain::{Joke, JokeDraft};

/// Complete view model published to presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    /// Merged local and remote jokes, in display order.
    pub items: Vec<Joke>,

    /// Query of the latest search.
    pub query: String,

    pub status: SearchStatus,

    /// Mapped gateway message when `status` is `Error`.
    pub error_message: Option<String>,

    /// True until the first search response has been honored.
    pub initial_load: bool,

    /// Shown when the latest search succeeded with nothing to display.
    pub empty_state: Option<EmptyState>,

    /// Present while the submission dialog is visible.
    pub dialog: Option<DialogView>,

    pub notification: Option<NotificationView>,

    /// Shareable form of the current location.
    pub location: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

impl EmptyState {
    #[must_use]
    pub fn no_jokes() -> Self {
        Self {
            message: "No jokes found".to_string(),
            subtitle: "Try adjusting your search criteria or search for something else.".to_string(),
        }
    }
}

/// Submission dialog display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub draft: JokeDraft,
    pub submitting: bool,

    /// Whether the submit button is enabled.
    pub can_submit: bool,
    pub validation_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub message: String,
}
