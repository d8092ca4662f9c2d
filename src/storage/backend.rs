//! Key-value storage abstraction.
//!
//! This module defines the [`KeyValueStore`] trait, the opaque get/set capability
//! the local joke store persists through. Values are opaque strings; callers own
//! their encoding.

use crate::domain::error::Result;

/// Key under which the locally authored joke sequence is stored.
pub const LOCAL_JOKES_KEY: &str = "custom_jokes";

/// Abstraction over persistent key-value backends.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON file with atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local map, used in tests
///
/// # Examples
///
/// ```
/// use jokebox::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("greeting", "hello")?;
/// assert_eq!(store.get("greeting")?, Some("hello".to_string()));
/// # Ok::<(), jokebox::JokeboxError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (I/O failure, quota exceeded).
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
