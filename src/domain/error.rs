//! Error types for the jokebox controller.
//!
//! This module defines the centralized error type [`JokeboxError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Remote search failures are not represented here: they have their own closed
//! taxonomy in [`crate::gateway::FetchError`] so that raw transport detail never
//! reaches the search state.

use thiserror::Error;

/// The main error type for jokebox operations.
///
/// None of these are fatal to the process. Storage failures are logged and
/// swallowed at the store boundary, draft failures keep the dialog interactive.
///
/// # Examples
///
/// ```
/// use jokebox::JokeboxError;
///
/// fn write_entry() -> Result<(), JokeboxError> {
///     Err(JokeboxError::Storage("quota exceeded".to_string()))
/// }
///
/// assert!(write_entry().is_err());
/// ```
#[derive(Debug, Error)]
pub enum JokeboxError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key-value backend fails,
    /// for example when the file cannot be replaced or a quota is exceeded.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A draft was handed to the store without the fields its kind requires.
    ///
    /// Validation proper (minimum lengths) happens in the dialog; this only
    /// guards the structural shape of a joke.
    #[error("Invalid draft: {0}")]
    InvalidDraft(String),
}

/// A specialized `Result` type for jokebox operations.
pub type Result<T> = std::result::Result<T, JokeboxError>;
