//! JSON file-based key-value backend.
//!
//! All keys live in one human-readable JSON file. Writes go through a temporary
//! file followed by a rename so a crash never leaves a half-written file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "custom_jokes": "[{\"id\":1700000000000,\"type\":\"single\",...}]"
//!   }
//! }
//! ```

use crate::domain::error::{JokeboxError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value backend.
///
/// The whole map is held in memory and written back on every `set`.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`; it is owned by a single controller.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StorageData,
}

impl JsonFileStore {
    /// Opens the backing file, or starts empty if it does not exist.
    ///
    /// A file that exists but cannot be parsed is logged and treated as empty:
    /// corrupt persisted state must never block startup. The corrupt file is
    /// left in place until the next successful write replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jokebox::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::new(PathBuf::from("/tmp/jokebox/store.json"))?;
    /// # Ok::<(), jokebox::JokeboxError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(path = ?file_path, error = %e, "store file unreadable, starting empty");
                StorageData::default()
            })
        } else {
            tracing::debug!("initializing new empty store");
            StorageData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "store initialized");

        Ok(Self { file_path, data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)?;

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded store data"
        );

        Ok(data)
    }

    /// Writes the map to disk using write-to-temp then rename.
    fn save_to_file(&self) -> Result<()> {
        tracing::debug!(path = ?self.file_path, "saving store data");

        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path).map_err(|e| {
            JokeboxError::Storage(format!("failed to replace {}: {e}", self.file_path.display()))
        })?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set", key = %key, bytes = value.len()).entered();

        self.data.entries.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }
}
