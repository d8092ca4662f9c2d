//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes commands,
//! navigation changes, and task results, translating them into state changes
//! and action sequences. It serves as the primary control flow coordinator
//! for the controller.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from presentation commands or from finished runtime tasks
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` components
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Search**: `Search`, `QueryInput`, `Retry`, `LanguageChanged`
//! - **Dialog**: `OpenDialog`, `CloseDialog`, `Key`, `BackdropClick`,
//!   `SelectKind`, `UpdateDraft`, `Submit`
//! - **Navigation**: `LocationChanged`
//! - **Notification**: `ShowNotification`, `DismissNotification`
//! - **Task results**: `DebounceElapsed`, `SearchCompleted`,
//!   `SubmitDelayElapsed`, `SubmitSucceeded`, `SubmitFailed`,
//!   `NotificationExpired`, `LocalJokesChanged`
//!
//! Opening and closing the dialog never happens directly: both emit
//! [`Action::Navigate`], and the dialog follows the resulting
//! `LocationChanged`. Back/forward navigation therefore takes the same path as
//! the in-app controls.
//!
//! # Example
//!
//! ```rust
//! use jokebox::app::{handle_event, Action, AppState, Event, Timings};
//! use jokebox::gateway::Language;
//!
//! let mut state = AppState::new(Language::En, Timings::default());
//! let (_, actions) = handle_event(&mut state, &Event::OpenDialog)?;
//! assert_eq!(actions, vec![Action::Navigate { dialog_open: true }]);
//! # Ok::<(), jokebox::JokeboxError>(())
//! ```

use super::modes::Key;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{DraftField, Joke, JokeKind};
use crate::gateway::{FetchOutcome, Language, SearchRequest};
use crate::infrastructure::{FocusTarget, Location};
use chrono::TimeDelta;

/// Events triggered by presentation commands, navigation, or finished tasks.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Explicit search, dispatched immediately.
    Search { query: String },

    /// Raw keystroke-driven query text, subject to debounce.
    QueryInput { raw: String },

    /// Quiet period ended for the given input generation.
    DebounceElapsed { generation: u64 },

    /// Re-issues the current query.
    Retry,

    SearchCompleted {
        request_id: u64,
        outcome: FetchOutcome,
    },

    /// Request language changed; the current query is re-issued.
    LanguageChanged { language: Language },

    /// Local joke sequence was replaced.
    LocalJokesChanged,

    OpenDialog,
    CloseDialog,

    /// Navigation reported a new current location.
    LocationChanged {
        location: Location,
        /// What had focus when the location changed.
        focused: Option<FocusTarget>,
    },

    /// Key press while `focused` had focus.
    Key {
        key: Key,
        focused: Option<FocusTarget>,
    },

    /// Pointer click on the dialog overlay. `on_backdrop` is false when the
    /// click originated inside the dialog surface.
    BackdropClick { on_backdrop: bool },

    SelectKind { kind: JokeKind },
    UpdateDraft { field: DraftField, value: String },
    Submit,

    /// Simulated submit latency elapsed.
    SubmitDelayElapsed { submission: u64 },
    SubmitSucceeded { submission: u64, joke: Joke },
    SubmitFailed { submission: u64, message: String },

    ShowNotification { message: String, duration: TimeDelta },
    DismissNotification,
    NotificationExpired { id: u64 },

    /// Controller is being torn down; nothing is honored afterwards.
    Teardown,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned boolean says whether the view model may have changed and
/// should be republished.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature stable for handlers
/// that may need to reject events.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.search.is_torn_down() {
        tracing::debug!("controller torn down, ignoring event");
        return Ok((false, vec![]));
    }

    match event {
        Event::Search { query } => {
            state.debouncer.settle(query);
            Ok((true, vec![dispatch_search(state, query)]))
        }
        Event::QueryInput { raw } => {
            let generation = state.debouncer.input(raw);
            tracing::trace!(generation, raw = %raw, "query input");
            Ok((
                false,
                vec![Action::ScheduleDebounce {
                    generation,
                    after: state.timings.debounce,
                }],
            ))
        }
        Event::DebounceElapsed { generation } => {
            let Some(query) = state.debouncer.elapsed(*generation) else {
                return Ok((false, vec![]));
            };
            Ok((true, vec![dispatch_search(state, &query)]))
        }
        Event::Retry => {
            let query = state.search.query.clone();
            tracing::debug!(query = %query, "retrying search");
            Ok((true, vec![dispatch_search(state, &query)]))
        }
        Event::SearchCompleted { request_id, outcome } => {
            let honored = state.search.complete(*request_id, outcome.clone());
            Ok((honored, vec![]))
        }
        Event::LanguageChanged { language } => {
            if state.language == *language {
                return Ok((false, vec![]));
            }
            tracing::debug!(language = language.code(), "language changed");
            state.language = *language;
            let query = state.search.query.clone();
            Ok((true, vec![dispatch_search(state, &query)]))
        }
        Event::LocalJokesChanged => Ok((true, vec![])),

        Event::OpenDialog => {
            if state.dialog.visible {
                return Ok((false, vec![]));
            }
            Ok((false, vec![Action::Navigate { dialog_open: true }]))
        }
        Event::CloseDialog => Ok((false, close_via_navigation(state))),
        Event::LocationChanged { location, focused } => {
            state.location = location.clone();
            let requested = location.dialog_requested();

            if requested && !state.dialog.visible {
                state.dialog.open(focused.and_then(FocusTarget::page_element));
                let first = state.dialog.initial_focus();
                Ok((true, vec![Action::Focus(FocusTarget::Dialog(first))]))
            } else if !requested && state.dialog.visible {
                let actions = state
                    .dialog
                    .close()
                    .map(Action::RestoreFocus)
                    .into_iter()
                    .collect();
                Ok((true, actions))
            } else {
                Ok((true, vec![]))
            }
        }
        Event::Key { key, focused } => {
            if !state.dialog.visible {
                return Ok((false, vec![]));
            }
            match key {
                Key::Escape => Ok((false, close_via_navigation(state))),
                Key::Tab { shift } => {
                    let actions = state
                        .dialog
                        .trap_tab(*focused, *shift)
                        .map(|target| Action::Focus(FocusTarget::Dialog(target)))
                        .into_iter()
                        .collect();
                    Ok((false, actions))
                }
            }
        }
        Event::BackdropClick { on_backdrop } => {
            if !on_backdrop {
                return Ok((false, vec![]));
            }
            Ok((false, close_via_navigation(state)))
        }
        Event::SelectKind { kind } => {
            if !state.dialog.visible || state.dialog.submitting {
                return Ok((false, vec![]));
            }
            state.dialog.draft.kind = *kind;
            state.dialog.validation_error = None;
            Ok((true, vec![]))
        }
        Event::UpdateDraft { field, value } => {
            if !state.dialog.visible || state.dialog.submitting {
                return Ok((false, vec![]));
            }
            state.dialog.draft.set_field(*field, value.clone());
            state.dialog.validation_error = None;
            Ok((true, vec![]))
        }
        Event::Submit => {
            let had_error = state.dialog.validation_error.is_some();
            match state.dialog.begin_submit() {
                Some(submission) => Ok((
                    true,
                    vec![Action::ScheduleSubmit {
                        submission,
                        after: state.timings.submit_latency,
                    }],
                )),
                None => Ok((had_error != state.dialog.validation_error.is_some(), vec![])),
            }
        }
        Event::SubmitDelayElapsed { submission } => {
            if !state.dialog.is_current_submission(*submission) {
                tracing::debug!(submission, "submission abandoned before write");
                return Ok((false, vec![]));
            }
            Ok((
                false,
                vec![Action::PersistDraft {
                    submission: *submission,
                    draft: state.dialog.draft.clone(),
                }],
            ))
        }
        Event::SubmitSucceeded { submission, joke } => {
            if !state.dialog.is_current_submission(*submission) {
                return Ok((false, vec![]));
            }
            tracing::info!(id = joke.id, kind = joke.kind().as_str(), "joke added");

            let dismiss = state
                .notifications
                .show(super::notification::JOKE_ADDED_MESSAGE, state.timings.notification);
            Ok((true, vec![dismiss, Action::Navigate { dialog_open: false }]))
        }
        Event::SubmitFailed { submission, message } => {
            if !state.dialog.is_current_submission(*submission) {
                return Ok((false, vec![]));
            }
            tracing::warn!(submission, error = %message, "submission failed");
            state.dialog.fail_submission();
            Ok((true, vec![]))
        }

        Event::ShowNotification { message, duration } => {
            let action = state.notifications.show(message.clone(), *duration);
            Ok((true, vec![action]))
        }
        Event::DismissNotification => {
            let removed = state.notifications.dismiss();
            Ok((removed, vec![Action::CancelDismiss]))
        }
        Event::NotificationExpired { id } => Ok((state.notifications.expire(*id), vec![])),

        Event::Teardown => {
            tracing::debug!("tearing down controller");
            state.search.tear_down();
            Ok((false, vec![Action::CancelAll]))
        }
    }
}

fn dispatch_search(state: &mut AppState, query: &str) -> Action {
    let request_id = state.search.begin(query);
    Action::Fetch {
        request_id,
        request: SearchRequest::new(query, state.language),
    }
}

fn close_via_navigation(state: &AppState) -> Vec<Action> {
    if state.dialog.visible {
        vec![Action::Navigate { dialog_open: false }]
    } else {
        vec![]
    }
}
