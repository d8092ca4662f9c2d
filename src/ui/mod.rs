//! Presentation boundary of the controller.
//!
//! The controller publishes a [`ViewModel`] after every state change;
//! presentation reads it and sends commands back, never mutating state
//! directly.
//!
//! ```text
//! AppState → compute_viewmodel → ViewModel → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable state
//! - [`renderer`]: Plain-text rendering used by the terminal shim

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use viewmodel::{DialogView, EmptyState, NotificationView, ViewModel};
