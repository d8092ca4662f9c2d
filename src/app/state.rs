//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! controller. It groups the search orchestrator, the keystroke debouncer, the
//! submission dialog, and the notification scheduler, plus the few settings
//! the handler needs to build actions (language and timings). It is the single
//! source of truth for all transient state; the local joke sequence is the one
//! exception and is passed in when a view model is computed.
//!
//! # Example
//!
//! ```rust
//! use jokebox::app::{AppState, Timings};
//! use jokebox::gateway::Language;
//!
//! let state = AppState::new(Language::En, Timings::default());
//! let viewmodel = state.compute_viewmodel(&[]);
//! assert!(viewmodel.initial_load);
//! ```

use super::dialog::DialogState;
use super::notification::{NotificationScheduler, DEFAULT_NOTIFICATION_MS};
use super::search::{display_list, Debouncer, SearchState};
use super::modes::SearchStatus;
use crate::domain::Joke;
use crate::gateway::Language;
use crate::infrastructure::Location;
use crate::ui::viewmodel::{DialogView, EmptyState, NotificationView, ViewModel};
use chrono::TimeDelta;
use std::time::Duration;

/// Quiet period for keystroke-driven search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Simulated latency of the submit pipeline.
pub const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_millis(300);

/// Delays and durations used when emitting timer actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub debounce: Duration,
    pub submit_latency: Duration,

    /// Non-positive means notifications stay until dismissed.
    pub notification: TimeDelta,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            submit_latency: DEFAULT_SUBMIT_LATENCY,
            notification: TimeDelta::milliseconds(DEFAULT_NOTIFICATION_MS),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub search: SearchState,
    pub debouncer: Debouncer,
    pub dialog: DialogState,
    pub notifications: NotificationScheduler,

    /// Language sent with every search request.
    pub language: Language,
    pub timings: Timings,

    /// Last location reported by navigation.
    pub location: Location,
}

impl AppState {
    #[must_use]
    pub fn new(language: Language, timings: Timings) -> Self {
        Self {
            search: SearchState::new(),
            debouncer: Debouncer::default(),
            dialog: DialogState::default(),
            notifications: NotificationScheduler::default(),
            language,
            timings,
            location: Location::default(),
        }
    }

    /// Merged display list for the given local sequence.
    #[must_use]
    pub fn display_list(&self, local: &[Joke]) -> Vec<Joke> {
        display_list(local, &self.search.query, &self.search.remote_jokes)
    }

    /// Computes the view model published to presentation.
    #[must_use]
    pub fn compute_viewmodel(&self, local: &[Joke]) -> ViewModel {
        let items = self.display_list(local);

        let empty_state = (self.search.status == SearchStatus::Success && items.is_empty())
            .then(EmptyState::no_jokes);

        let dialog = self.dialog.visible.then(|| DialogView {
            draft: self.dialog.draft.clone(),
            submitting: self.dialog.submitting,
            can_submit: self.dialog.can_submit(),
            validation_error: self.dialog.validation_error.clone(),
        });

        let notification = self.notifications.current().map(|n| NotificationView {
            message: n.message.clone(),
        });

        ViewModel {
            items,
            query: self.search.query.clone(),
            status: self.search.status,
            error_message: self.search.error_message.clone(),
            initial_load: self.search.initial_load,
            empty_state,
            dialog,
            notification,
            location: self.location.to_string(),
        }
    }
}
