//! Locally authored jokes.
//!
//! [`LocalJokeStore`] owns the user's own jokes: an ordered, newest-first sequence
//! persisted as JSON under [`LOCAL_JOKES_KEY`] on every mutation. Readers either
//! take a snapshot with [`LocalJokeStore::list`] or subscribe to changes through a
//! `tokio::sync::watch` channel, which is how the controller keeps the display
//! list current without re-wiring every mutation site.
//!
//! Mutations always replace the whole sequence, so a reader can never observe a
//! partially updated list.

use crate::domain::error::{JokeboxError, Result};
use crate::domain::{Joke, JokeDraft};
use crate::storage::backend::{KeyValueStore, LOCAL_JOKES_KEY};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared, immutable snapshot of the local sequence.
pub type LocalJokes = Arc<Vec<Joke>>;

/// Owner of the locally authored joke sequence.
///
/// # Examples
///
/// ```
/// use jokebox::domain::JokeDraft;
/// use jokebox::storage::{LocalJokeStore, MemoryStore};
///
/// let mut store = LocalJokeStore::open(Box::new(MemoryStore::default()));
/// let joke = store.add(&JokeDraft::single("Why did the chicken cross?"))?;
/// assert_eq!(store.list()[0], joke);
/// # Ok::<(), jokebox::JokeboxError>(())
/// ```
pub struct LocalJokeStore {
    backend: Box<dyn KeyValueStore>,
    jokes: watch::Sender<LocalJokes>,
    last_id: u64,
}

impl LocalJokeStore {
    /// Loads the persisted sequence, or starts empty.
    ///
    /// Missing, unreadable, or undecodable state all degrade to an empty
    /// sequence with a warning.
    #[must_use]
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let jokes = Self::load(backend.as_ref());
        let last_id = jokes.iter().map(|joke| joke.id).max().unwrap_or(0);

        tracing::debug!(count = jokes.len(), last_id, "local joke store opened");

        let (sender, _receiver) = watch::channel(Arc::new(jokes));
        Self {
            backend,
            jokes: sender,
            last_id,
        }
    }

    fn load(backend: &dyn KeyValueStore) -> Vec<Joke> {
        let raw = match backend.get(LOCAL_JOKES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read local jokes, starting empty");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "persisted local jokes are corrupt, starting empty");
            Vec::new()
        })
    }

    /// Current sequence, newest first.
    #[must_use]
    pub fn list(&self) -> LocalJokes {
        self.jokes.borrow().clone()
    }

    /// Receiver that observes every replacement of the sequence.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LocalJokes> {
        self.jokes.subscribe()
    }

    /// Creates a joke from `draft`, prepends it, and persists the sequence.
    ///
    /// A failed write is logged and otherwise ignored: the in-memory sequence
    /// still gains the joke, so the submission succeeds for this session.
    ///
    /// # Errors
    ///
    /// Returns [`JokeboxError::InvalidDraft`](crate::JokeboxError::InvalidDraft)
    /// if the draft lacks the text its kind requires.
    pub fn add(&mut self, draft: &JokeDraft) -> Result<Joke> {
        let content = draft.to_content()?;
        let joke = Joke::local(self.allocate_id(), content);

        let _span = tracing::debug_span!("local_add", id = joke.id, kind = joke.kind().as_str()).entered();

        let current = self.list();
        let mut updated = Vec::with_capacity(current.len() + 1);
        updated.push(joke.clone());
        updated.extend(current.iter().cloned());

        self.replace(updated);
        Ok(joke)
    }

    /// Removes the joke with `id`. Returns false (and writes nothing) if absent.
    pub fn remove(&mut self, id: u64) -> bool {
        let current = self.list();
        if !current.iter().any(|joke| joke.id == id) {
            tracing::debug!(id, "remove ignored, joke not found");
            return false;
        }

        let updated = current.iter().filter(|joke| joke.id != id).cloned().collect();
        self.replace(updated);
        tracing::debug!(id, "local joke removed");
        true
    }

    fn replace(&mut self, jokes: Vec<Joke>) {
        self.persist(&jokes);
        self.jokes.send_replace(Arc::new(jokes));
    }

    fn persist(&mut self, jokes: &[Joke]) {
        let result = serde_json::to_string(jokes)
            .map_err(JokeboxError::from)
            .and_then(|json| self.backend.set(LOCAL_JOKES_KEY, &json));

        if let Err(e) = result {
            tracing::error!(error = %e, count = jokes.len(), "failed to persist local jokes");
        }
    }

    /// Millisecond timestamp, bumped past the previous id on collision.
    fn allocate_id(&mut self) -> u64 {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }
}

impl std::fmt::Debug for LocalJokeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalJokeStore")
            .field("count", &self.jokes.borrow().len())
            .field("last_id", &self.last_id)
            .finish_non_exhaustive()
    }
}
