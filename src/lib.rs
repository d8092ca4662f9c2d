//! Jokebox: a headless search-and-submission controller for a joke list.
//!
//! Jokebox provides:
//! - Debounced, cancel-by-sequence search against a remote joke API
//! - A newest-first store of the user's own jokes, persisted as JSON
//! - A merged display list recomputed whenever its inputs change
//! - A submission dialog with validation, a focus trap, and focus restore
//! - Deep-linkable dialog state that follows back/forward navigation
//! - Single-slot toast notifications with auto-dismiss

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shim (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← tokio tasks
//! │  - Action execution, timers, cancellation           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Search, dialog, notification state               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Gateway       │
//! │ (ui/)         │   │ (storage/)    │   │ (gateway/)    │
//! │ - View model  │   │ - KV backends │   │ - HTTP client │
//! │ - Rendering   │   │ - Local jokes │   │ - Error kinds │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Focus and history capabilities (infrastructure/) │
//! │  - Joke model and errors (domain/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing-subscriber with rotating log file        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (jokes, drafts, errors)
//! - [`gateway`]: Remote search request building and error mapping
//! - [`infrastructure`]: Focus and navigation capabilities, data paths
//! - [`runtime`]: The [`Controller`](runtime::Controller) executing side effects
//! - [`storage`]: Key-value backends and the local joke store
//! - [`ui`]: View model and plain-text rendering
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! Configuration comes from a string map, usually read from a TOML file:
//!
//! ```toml
//! api_base_url = "https://v2.jokeapi.dev/joke/Any"
//! language = "en"
//! debounce_ms = 500
//! notification_ms = 3000
//! submit_latency_ms = 300
//! data_dir = "~/.local/share/jokebox"
//! log_level = "debug"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use jokebox::{handle_event, AppState, Config, Event};
//!
//! let config = Config::default();
//! let mut state = AppState::new(config.language, config.timings());
//!
//! let (changed, actions) = handle_event(&mut state, &Event::Search { query: "cats".into() })?;
//! assert!(changed);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), jokebox::JokeboxError>(())
//! ```

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Timings};
pub use domain::{Joke, JokeboxError, Result};
pub use gateway::Language;
pub use runtime::Controller;

use gateway::{HttpJokeSource, DEFAULT_BASE_URL};
use infrastructure::{expand_tilde, get_data_dir, FocusHost, NavigationHost, STORE_FILE_NAME};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::{JsonFileStore, LocalJokeStore};

/// Controller configuration.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use jokebox::{Config, Language};
///
/// let mut map = BTreeMap::new();
/// map.insert("language".to_string(), "fr".to_string());
/// map.insert("debounce_ms".to_string(), "250".to_string());
///
/// let config = Config::from_map(&map);
/// assert_eq!(config.language, Language::Fr);
/// assert_eq!(config.debounce_ms, 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Endpoint of the joke API. Default: [`DEFAULT_BASE_URL`]
    pub api_base_url: String,

    /// Language requested from the API. Default: `en`
    pub language: Language,

    /// Quiet period for keystroke-driven search. Default: 500
    pub debounce_ms: u64,

    /// How long notifications stay visible; `<= 0` never dismisses. Default: 3000
    pub notification_ms: i64,

    /// Simulated latency of the submit pipeline. Default: 300
    pub submit_latency_ms: u64,

    /// Client-side request timeout. Unset by default: a hung request keeps
    /// the search loading.
    pub request_timeout_secs: Option<u64>,

    /// Directory holding the store file and logs.
    pub data_dir: PathBuf,

    /// Tracing filter directive, such as `debug` or `jokebox=trace`.
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            language: Language::default(),
            debounce_ms: 500,
            notification_ms: 3000,
            submit_latency_ms: 300,
            request_timeout_secs: None,
            data_dir: get_data_dir(),
            log_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - Missing keys and unparseable values fall back to defaults
    /// - `language`: `en` or `fr`, case-insensitive
    /// - `data_dir`: a leading `~` is expanded
    /// - `request_timeout_secs`: `0` means no timeout
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str| config.get(key).map(|value| value.trim());

        Self {
            api_base_url: parse("api_base_url")
                .filter(|url| !url.is_empty())
                .map_or(defaults.api_base_url, String::from),
            language: parse("language")
                .and_then(Language::from_code)
                .unwrap_or(defaults.language),
            debounce_ms: parse("debounce_ms")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.debounce_ms),
            notification_ms: parse("notification_ms")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.notification_ms),
            submit_latency_ms: parse("submit_latency_ms")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.submit_latency_ms),
            request_timeout_secs: parse("request_timeout_secs")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0),
            data_dir: parse("data_dir")
                .filter(|dir| !dir.is_empty())
                .map_or(defaults.data_dir, |dir| PathBuf::from(expand_tilde(dir))),
            log_level: parse("log_level")
                .filter(|level| !level.is_empty())
                .map(String::from),
        }
    }

    /// Loads configuration from a TOML file of top-level keys.
    ///
    /// # Errors
    ///
    /// Returns [`JokeboxError::Config`] if the file cannot be read or is not a
    /// TOML table.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            JokeboxError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        let table: toml::Table = toml::from_str(&contents)
            .map_err(|e| JokeboxError::Config(format!("failed to parse {}: {e}", path.display())))?;

        let map = table
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();

        Ok(Self::from_map(&map))
    }

    #[must_use]
    pub fn timings(&self) -> Timings {
        Timings {
            debounce: Duration::from_millis(self.debounce_ms),
            submit_latency: Duration::from_millis(self.submit_latency_ms),
            notification: chrono::TimeDelta::try_milliseconds(self.notification_ms)
                .unwrap_or_else(chrono::TimeDelta::zero),
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

/// Builds a started controller from configuration.
///
/// Opens the JSON store in the data directory, creates the HTTP joke source,
/// syncs the dialog with the navigation's current location, and issues the
/// initial search. Must be called inside a tokio runtime.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the HTTP
/// client cannot be built. A corrupt store file is not an error.
pub fn initialize(
    config: &Config,
    focus: Box<dyn FocusHost>,
    navigation: Box<dyn NavigationHost>,
) -> Result<Controller> {
    tracing::debug!(data_dir = %config.data_dir.display(), "initializing jokebox");

    let backend = JsonFileStore::new(config.store_path())?;
    let store = LocalJokeStore::open(Box::new(backend));
    let source = HttpJokeSource::new(config.api_base_url.clone(), config.request_timeout())?;

    let mut controller = Controller::new(
        AppState::new(config.language, config.timings()),
        store,
        Arc::new(source),
        focus,
        navigation,
    );
    controller.start();
    Ok(controller)
}
