//! Remote search gateway.
//!
//! Translates a query into a joke API request and maps every failure into the
//! closed [`FetchError`] taxonomy.
//!
//! # Modules
//!
//! - `client`: request parameters, the [`JokeSource`] capability, and its HTTP implementation
//! - `error`: failure kinds and their user-facing messages

pub mod client;
pub mod error;

pub use client::{
    ApiResponse, FetchOutcome, HttpJokeSource, JokeSource, Language, SearchRequest,
    DEFAULT_BASE_URL, RESULT_LIMIT,
};
pub use error::FetchError;
