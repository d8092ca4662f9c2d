//! Infrastructure layer for the capabilities the controller borrows from its host.
//!
//! The controller is headless: keyboard focus and the navigable location belong
//! to whatever presents it. This module defines those capabilities as traits,
//! ships in-memory implementations used by the terminal shim and the tests, and
//! resolves where data lives on disk.
//!
//! # Modules
//!
//! - [`focus`]: focus capability and the dialog's element identities
//! - [`history`]: locations, the dialog deep-link parameter, and history navigation
//! - [`paths`]: data directory resolution

pub mod focus;
pub mod history;
pub mod paths;

pub use focus::{DialogElement, ElementId, FocusHost, FocusTarget, VirtualDocument};
pub use history::{Location, MemoryHistory, NavigationHost, DIALOG_PARAM};
pub use paths::{expand_tilde, get_data_dir, STORE_FILE_NAME};
