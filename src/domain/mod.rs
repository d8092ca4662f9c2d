//! Domain layer for the jokebox controller.
//!
//! This module contains the core domain types, independent of the network,
//! storage, and presentation concerns that surround them.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`joke`]: Joke model, content shapes, and the submission draft
//!
//! # Examples
//!
//! ```
//! use jokebox::domain::{JokeDraft, JokeContent, Result};
//!
//! fn content() -> Result<JokeContent> {
//!     JokeDraft::single("  Knock knock, who is there?  ").to_content()
//! }
//! # assert!(content().is_ok());
//! ```

pub mod error;
pub mod joke;

pub use error::{JokeboxError, Result};
pub use joke::{
    ContentFlags, DraftField, Joke, JokeContent, JokeDraft, JokeKind, LOCAL_CATEGORY,
};
