//! Search orchestration state.
//!
//! [`SearchState`] tracks the query, status, and remote results, and tags every
//! dispatched request with an increasing id. Only the response carrying the
//! latest id may change state; anything older is a stale response and is
//! dropped on arrival. [`Debouncer`] coalesces keystroke-driven input and
//! suppresses consecutive identical queries. [`display_list`] is the single
//! place where local and remote jokes are merged.

use super::modes::SearchStatus;
use crate::domain::Joke;
use crate::gateway::FetchOutcome;

/// Query, progress, and remote results of the search controller.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub status: SearchStatus,
    pub error_message: Option<String>,
    pub remote_jokes: Vec<Joke>,

    /// True until the first honored response arrives.
    pub initial_load: bool,

    latest_request: u64,
    torn_down: bool,
}

impl SearchState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_load: true,
            ..Self::default()
        }
    }

    /// Records a new search and returns the id its response must carry.
    ///
    /// Status becomes `Loading` immediately; the previous remote jokes stay
    /// visible until the response arrives.
    pub fn begin(&mut self, query: &str) -> u64 {
        self.latest_request += 1;
        self.query = query.to_string();
        self.status = SearchStatus::Loading;
        self.error_message = None;

        tracing::debug!(request_id = self.latest_request, query = %self.query, "search dispatched");
        self.latest_request
    }

    /// Applies a response. Returns false when the response is stale or the
    /// controller has been torn down, in which case nothing changes.
    pub fn complete(&mut self, request_id: u64, outcome: FetchOutcome) -> bool {
        if self.torn_down || request_id != self.latest_request {
            tracing::debug!(
                request_id,
                latest = self.latest_request,
                torn_down = self.torn_down,
                "stale response ignored"
            );
            return false;
        }

        self.initial_load = false;
        match outcome {
            Ok(jokes) => {
                tracing::debug!(request_id, count = jokes.len(), "search succeeded");
                self.remote_jokes = jokes;
                self.error_message = None;
                self.status = SearchStatus::Success;
            }
            Err(kind) => {
                tracing::debug!(request_id, error = ?kind, "search failed");
                self.remote_jokes.clear();
                self.error_message = Some(kind.user_message());
                self.status = SearchStatus::Error;
            }
        }
        true
    }

    #[must_use]
    pub const fn latest_request(&self) -> u64 {
        self.latest_request
    }

    /// Stops honoring any further responses.
    pub fn tear_down(&mut self) {
        self.torn_down = true;
    }

    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

/// Coalesces keystroke-driven query input.
///
/// Every keystroke bumps a generation; only the timer for the newest
/// generation may fire a search, and only if its trimmed value differs from
/// the last value this debouncer emitted.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    generation: u64,
    pending: Option<String>,
    last_emitted: Option<String>,
}

impl Debouncer {
    /// Records raw input and returns the generation its timer must carry.
    pub fn input(&mut self, raw: &str) -> u64 {
        self.generation += 1;
        self.pending = Some(raw.to_string());
        self.generation
    }

    /// Resolves a fired timer to the query to search, if any.
    pub fn elapsed(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            return None;
        }

        let query = self.pending.take()?;
        let trimmed = query.trim();
        if self.last_emitted.as_deref() == Some(trimmed) {
            tracing::trace!(query = %trimmed, "debounced query unchanged, skipping");
            return None;
        }

        self.last_emitted = Some(trimmed.to_string());
        Some(query)
    }

    /// Records a search issued outside the debouncer and drops pending input,
    /// so a later keystroke back to an earlier value still fires.
    pub fn settle(&mut self, query: &str) {
        self.generation += 1;
        self.pending = None;
        self.last_emitted = Some(query.trim().to_string());
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Merges local and remote jokes for display.
///
/// With a blank query the user's own jokes come first, followed by the remote
/// results; during an active search only remote results are shown.
///
/// # Examples
///
/// ```
/// use jokebox::app::display_list;
/// use jokebox::domain::{Joke, JokeContent};
///
/// let local = vec![Joke::local(1, JokeContent::Single { text: "mine".into() })];
/// let remote = vec![Joke::local(2, JokeContent::Single { text: "theirs".into() })];
///
/// assert_eq!(display_list(&local, "  ", &remote).len(), 2);
/// assert_eq!(display_list(&local, "cats", &remote), remote);
/// ```
#[must_use]
pub fn display_list(local: &[Joke], query: &str, remote: &[Joke]) -> Vec<Joke> {
    if query.trim().is_empty() {
        local.iter().chain(remote.iter()).cloned().collect()
    } else {
        remote.to_vec()
    }
}
