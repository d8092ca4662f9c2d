//! Remote search failure taxonomy.
//!
//! Every failure of a remote search collapses into one of six [`FetchError`]
//! kinds. Each kind renders as a fixed, user-facing message; raw transport text
//! is logged where the failure happens and never carried further.

use thiserror::Error;

/// Substring the joke API uses when nothing matched the `contains` filter.
const NO_MATCH_MARKER: &str = "No matching joke";

/// Mapped outcome of a failed remote search.
///
/// # Examples
///
/// ```
/// use jokebox::gateway::FetchError;
///
/// assert_eq!(FetchError::from_status(None), FetchError::Unreachable);
/// assert_eq!(FetchError::from_status(Some(404)), FetchError::InvalidRequest);
/// assert_eq!(FetchError::from_status(Some(503)), FetchError::ServiceUnavailable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API reported that no joke matched the query.
    #[error("No jokes found matching your search criteria. Try a different search term.")]
    NotFound,

    /// The API reported some other application-level failure.
    #[error("Unable to fetch jokes. Please try again later.")]
    ServiceError,

    /// No response arrived (DNS, refused connection, TLS, timeout).
    #[error("Unable to connect to the joke service. Please check your internet connection.")]
    Unreachable,

    /// HTTP 4xx.
    #[error("Invalid request. Please try again.")]
    InvalidRequest,

    /// HTTP 5xx.
    #[error("The joke service is currently unavailable. Please try again later.")]
    ServiceUnavailable,

    /// Anything else: unexpected status, undecodable body.
    #[error("An unexpected error occurred. Please try again.")]
    Unknown,
}

impl FetchError {
    /// Maps an application-level error message from the API body.
    #[must_use]
    pub fn from_api_message(message: Option<&str>) -> Self {
        match message {
            Some(text) if text.contains(NO_MATCH_MARKER) => Self::NotFound,
            _ => Self::ServiceError,
        }
    }

    /// Maps a transport status; `None` means no response was received.
    #[must_use]
    pub const fn from_status(status: Option<u16>) -> Self {
        match status {
            None => Self::Unreachable,
            Some(400..=499) => Self::InvalidRequest,
            Some(500..=599) => Self::ServiceUnavailable,
            Some(_) => Self::Unknown,
        }
    }

    /// The fixed user-facing message for this kind.
    #[must_use]
    pub fn user_message(self) -> String {
        self.to_string()
    }
}

impl From<&reqwest::Error> for FetchError {
    fn from(error: &reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            Self::from_status(Some(status.as_u16()))
        } else if error.is_decode() || error.is_body() {
            Self::Unknown
        } else {
            Self::from_status(None)
        }
    }
}
