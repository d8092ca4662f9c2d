//! Remote joke search client.
//!
//! [`SearchRequest`] turns a raw query into the fixed request parameters the joke
//! API expects; [`JokeSource`] is the fetch capability the controller depends on;
//! [`HttpJokeSource`] implements it over HTTP with `reqwest`.

use crate::domain::{ContentFlags, Joke};
use crate::gateway::error::FetchError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::Instrument;

/// Default endpoint of the joke API.
pub const DEFAULT_BASE_URL: &str = "https://v2.jokeapi.dev/joke/Any";

/// Number of jokes requested per search.
pub const RESULT_LIMIT: u32 = 10;

/// Result of one remote search.
pub type FetchOutcome = std::result::Result<Vec<Joke>, FetchError>;

/// Language of the jokes requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Parses a language code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }
}

/// Parameters of one remote search.
///
/// # Examples
///
/// ```
/// use jokebox::gateway::{Language, SearchRequest};
///
/// let request = SearchRequest::new("  programming  ", Language::En);
/// assert_eq!(request.contains.as_deref(), Some("programming"));
///
/// let unfiltered = SearchRequest::new("   ", Language::En);
/// assert!(unfiltered.contains.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Trimmed text filter; `None` for an empty or whitespace-only query.
    pub contains: Option<String>,
    pub language: Language,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: &str, language: Language) -> Self {
        let trimmed = query.trim();
        Self {
            contains: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            language,
        }
    }

    /// Query parameters in transmission order.
    ///
    /// The safety blacklist is always applied and is not configurable.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("amount", RESULT_LIMIT.to_string()),
            ("lang", self.language.code().to_string()),
            ("blacklistFlags", ContentFlags::ALL.join(",")),
        ];
        if let Some(contains) = &self.contains {
            params.push(("contains", contains.clone()));
        }
        params
    }
}

/// Body returned by the joke API.
///
/// On application-level errors `error` is true, `message` explains why, and
/// `jokes` is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub amount: u32,
    #[serde(default)]
    pub jokes: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Converts the body into jokes or a mapped error.
    ///
    /// Entries that do not decode as a complete joke are skipped with a warning
    /// rather than failing the whole search.
    #[must_use]
    pub fn into_outcome(self) -> FetchOutcome {
        if self.error {
            tracing::debug!(message = ?self.message, "joke API reported an error");
            return Err(FetchError::from_api_message(self.message.as_deref()));
        }

        let jokes = self
            .jokes
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Joke>(value) {
                Ok(joke) if joke.content.is_complete() => Some(joke),
                Ok(joke) => {
                    tracing::warn!(id = joke.id, "skipping joke with blank content");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable joke");
                    None
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(reported = self.amount, decoded = jokes.len(), "joke API response decoded");
        Ok(jokes)
    }
}

/// Capability that answers a search with jokes or a mapped error.
///
/// Implementations must never surface raw transport text; every failure is a
/// [`FetchError`].
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> FetchOutcome;
}

/// [`JokeSource`] backed by the joke API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpJokeSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJokeSource {
    /// Builds a client for `base_url`.
    ///
    /// `timeout` is applied to the whole request when set; without it a hung
    /// request stays pending until the transport gives up.
    ///
    /// # Errors
    ///
    /// Returns [`JokeboxError::Config`](crate::JokeboxError::Config) if the TLS
    /// backend cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> crate::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| crate::JokeboxError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch(&self, request: &SearchRequest) -> FetchOutcome {
        let response = self
            .client
            .get(&self.base_url)
            .query(&request.params())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "joke API request failed");
                FetchError::from(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "joke API returned an error status");
            return Err(FetchError::from_status(Some(status.as_u16())));
        }

        let body: ApiResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "joke API body could not be decoded");
            FetchError::from(&e)
        })?;

        body.into_outcome()
    }
}

#[async_trait]
impl JokeSource for HttpJokeSource {
    async fn search(&self, request: &SearchRequest) -> FetchOutcome {
        let span = tracing::debug_span!(
            "http_search",
            contains = ?request.contains,
            lang = request.language.code()
        );
        self.fetch(request).instrument(span).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
    }

    #[test]
    fn empty_query_omits_contains() {
        for query in ["", "   "] {
            let params = SearchRequest::new(query, Language::En).params();
            assert_eq!(param(&params, "contains"), None);
            assert_eq!(param(&params, "amount"), Some("10"));
        }
    }

    #[test]
    fn query_is_trimmed_before_transmission() {
        let params = SearchRequest::new("  programming  ", Language::Fr).params();
        assert_eq!(param(&params, "contains"), Some("programming"));
        assert_eq!(param(&params, "lang"), Some("fr"));
    }

    #[test]
    fn blacklist_is_always_applied() {
        let params = SearchRequest::new("cats", Language::En).params();
        assert_eq!(
            param(&params, "blacklistFlags"),
            Some("nsfw,religious,political,racist,sexist,explicit")
        );
    }

    #[test]
    fn application_error_maps_to_not_found() {
        let body: ApiResponse = serde_json::from_str(
            r#"{"error": true, "internalError": false, "code": 106,
                "message": "No matching joke found", "amount": 0}"#,
        )
        .unwrap();

        assert_eq!(body.into_outcome(), Err(FetchError::NotFound));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let body: ApiResponse = serde_json::from_str(
            r#"{"error": false, "amount": 2, "jokes": [
                {"id": 1, "type": "single", "joke": "Good one", "category": "Misc"},
                {"id": 2, "type": "twopart", "setup": "", "delivery": "", "category": "Misc"}
            ]}"#,
        )
        .unwrap();

        let jokes = body.into_outcome().unwrap();
        assert_eq!(jokes.len(), 1);
        assert_eq!(jokes[0].id, 1);
    }

    #[test]
    fn language_codes_parse() {
        assert_eq!(Language::from_code(" FR "), Some(Language::Fr));
        assert_eq!(Language::from_code("de"), None);
    }
}
