//! Storage layer for locally authored jokes.
//!
//! This module provides the key-value persistence capability and the local joke
//! store built on top of it.
//!
//! # Modules
//!
//! - `backend`: Key-value trait abstraction for backend implementations
//! - `json`: JSON file-based backend
//! - `memory`: In-memory backend for tests and ephemeral sessions
//! - `local`: Newest-first sequence of the user's own jokes

pub mod backend;
pub mod json;
pub mod local;
pub mod memory;

pub use backend::{KeyValueStore, LOCAL_JOKES_KEY};
pub use json::JsonFileStore;
pub use local::{LocalJokeStore, LocalJokes};
pub use memory::MemoryStore;
