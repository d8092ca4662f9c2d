//! Actions representing side effects to be executed by the controller runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or task results.
//! Actions bridge pure state transformations and effectful operations like
//! network fetches, timers, store writes, history pushes, and focus moves.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The runtime executes these
//! actions in order; asynchronous ones report back as events carrying the same
//! id they were issued with, so the handler can discard results that arrive too
//! late.
//!
//! # Example
//!
//! ```rust
//! use jokebox::app::Action;
//! use jokebox::gateway::{Language, SearchRequest};
//!
//! let actions = vec![Action::Fetch {
//!     request_id: 1,
//!     request: SearchRequest::new("cats", Language::En),
//! }];
//! # assert_eq!(actions.len(), 1);
//! ```

use crate::domain::JokeDraft;
use crate::gateway::SearchRequest;
use crate::infrastructure::{ElementId, FocusTarget};
use std::time::Duration;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs a remote search, aborting the previous one if still in flight.
    ///
    /// The response comes back as `Event::SearchCompleted` with `request_id`.
    Fetch {
        request_id: u64,
        request: SearchRequest,
    },

    /// Restarts the quiet-period timer for keystroke input.
    ScheduleDebounce { generation: u64, after: Duration },

    /// Waits out the simulated submit latency.
    ScheduleSubmit { submission: u64, after: Duration },

    /// Writes the draft through the local store.
    PersistDraft { submission: u64, draft: JokeDraft },

    /// Restarts the notification auto-dismiss timer.
    ScheduleDismiss { id: u64, after: Duration },

    /// Drops any pending auto-dismiss timer.
    CancelDismiss,

    /// Pushes a history entry with the dialog parameter set or removed.
    ///
    /// The resulting location is always fed back as `Event::LocationChanged`.
    Navigate { dialog_open: bool },

    Focus(FocusTarget),

    /// Returns focus to a page element, if it is still attached.
    RestoreFocus(ElementId),

    /// Aborts every pending task. Emitted on teardown.
    CancelAll,
}
