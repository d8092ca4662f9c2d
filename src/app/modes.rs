//! State machine enums for search progress, dialog phase, and keyboard input.
//!
//! # State Machine
//!
//! Search status moves `Idle → Loading → {Success, Error} → Loading → ...`;
//! a new search may start while the previous one is still loading.
//!
//! The dialog moves `Closed → Open → Submitting → Closed`, or back to `Open`
//! when validation or the write fails.
//!
//! # Example
//!
//! ```rust
//! use jokebox::app::{DialogPhase, Key, SearchStatus};
//!
//! let status = SearchStatus::Loading;
//! let key = Key::Tab { shift: true };
//! assert!(status.is_loading());
//! assert_ne!(DialogPhase::Open, DialogPhase::Closed);
//! # let _ = key;
//! ```

/// Progress of the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search issued yet.
    #[default]
    Idle,

    /// A request is in flight; only its response may leave this state.
    Loading,

    /// The latest response delivered jokes (possibly none).
    Success,

    /// The latest response failed; remote jokes are empty.
    Error,
}

impl SearchStatus {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Lifecycle phase of the submission dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Closed,
    Open,
    Submitting,
}

/// Keys the dialog intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Tab, or shift+Tab when `shift` is set.
    Tab { shift: bool },
    Escape,
}
