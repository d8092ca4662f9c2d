//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core controller logic, sitting between the runtime
//! (which owns tasks, the network, and host capabilities) and the domain and
//! storage layers. Everything here is synchronous and side-effect free apart
//! from logging.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Commands → Events → Event Handler → State Mutations → Actions → Side Effects
//!                          ↑                                          ↓
//!                          └──────────── Task Results ────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`dialog`]: Submission dialog state, validation, and focus trap
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Search status, dialog phase, and key types
//! - [`notification`]: Single-slot toast scheduling
//! - [`search`]: Search orchestration, debounce, and the display list
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use jokebox::app::{handle_event, Action, AppState, Event, Timings};
//! use jokebox::gateway::Language;
//!
//! let mut state = AppState::new(Language::En, Timings::default());
//! let (changed, actions) = handle_event(&mut state, &Event::Retry)?;
//! assert!(changed);
//! assert!(matches!(actions[0], Action::Fetch { .. }));
//! # Ok::<(), jokebox::JokeboxError>(())
//! ```

pub mod actions;
pub mod dialog;
pub mod handler;
pub mod modes;
pub mod notification;
pub mod search;
pub mod state;

pub use actions::Action;
pub use dialog::{validate_draft, DialogState, ValidationError, SUBMIT_FAILED_MESSAGE};
pub use handler::{handle_event, Event};
pub use modes::{DialogPhase, Key, SearchStatus};
pub use notification::{Notification, NotificationScheduler, JOKE_ADDED_MESSAGE};
pub use search::{display_list, Debouncer, SearchState};
pub use state::{AppState, Timings};
