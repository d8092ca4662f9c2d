//! Path utilities for locating jokebox data on disk.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "JOKEBOX_DATA_DIR";

/// File name of the key-value store inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Returns the data directory for jokebox storage and logs.
///
/// Resolution order: `JOKEBOX_DATA_DIR`, then `$HOME/.local/share/jokebox`,
/// then `./.jokebox` when no home directory is known.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(dir);
    }

    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".jokebox"),
        |home| PathBuf::from(home).join(".local").join("share").join("jokebox"),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or when `HOME` is unset, are returned unchanged.
///
/// # Examples
///
/// ```
/// use jokebox::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = std::env::var_os("HOME") else {
        return path.to_string();
    };
    let home = home.to_string_lossy();

    if let Some(rest) = path.strip_prefix("~/") {
        format!("{home}/{rest}")
    } else if path == "~" {
        home.into_owned()
    } else {
        path.to_string()
    }
}
