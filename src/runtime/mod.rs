//! Runtime layer executing controller side effects on tokio.
//!
//! # Modules
//!
//! - `controller`: command surface, action execution, and task scheduling

pub mod controller;

pub use controller::Controller;
