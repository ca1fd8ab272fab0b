//! `AccountError` - failure kinds of the account API client.

use reqwest::StatusCode;

/// Errors returned by [`AccountClient`](super::AccountClient) and the
/// [`LocalAccountApi`](super::LocalAccountApi) trait.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum AccountError {
    /// The request never produced a response (connect failure, timeout,
    /// broken body stream).
    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// The server answered 404.
    #[error("not found: {message}")]
    NotFound {
        /// TMDB `status_message`, or the raw body when it is not a TMDB error.
        message: String,
    },

    /// The server answered with a status other than the expected one.
    #[error("invalid server response (HTTP {status}): {message}")]
    InvalidResponse {
        /// Status actually returned.
        status: StatusCode,
        /// TMDB `status_message`, or the raw body when it is not a TMDB error.
        message: String,
    },

    /// The response body did not match the expected JSON shape.
    #[error("failed to decode JSON response: {path}")]
    Decode {
        /// Endpoint path the body came from.
        path: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized.
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    /// The endpoint path could not be joined onto the API root.
    #[error("invalid endpoint URL: {path}")]
    InvalidUrl {
        /// Endpoint path that failed to join.
        path: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The client or an outgoing request could not be constructed.
    #[error("failed to build account client: {0}")]
    Build(String),
}

impl AccountError {
    /// Returns `true` for the 404 case.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
