//! In-memory key-value backend.

use crate::domain::error::{JokeboxError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Process-local key-value store.
///
/// Clones share the same map, so a test can keep one handle to inspect what
/// the controller persisted through the other. `set_fail_writes(true)` makes
/// every subsequent `set` fail, to exercise the quota-exceeded path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryStore {
    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| JokeboxError::Storage(format!("store lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let failing = self.fail_writes.lock().map(|flag| *flag).unwrap_or(false);
        if failing {
            return Err(JokeboxError::Storage("quota exceeded".to_string()));
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|e| JokeboxError::Storage(format!("store lock poisoned: {e}")))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
