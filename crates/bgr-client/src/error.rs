//! Internal error types for the removal client.
//!
//! `TransportError` is what an [`HttpBackend`](crate::http::HttpBackend)
//! reports; the client maps it onto the shared `ApiError` taxonomy before
//! anything leaves this crate.

use thiserror::Error;

/// Failure to obtain any HTTP response at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response arrived in time.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be made or dropped mid-exchange.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request could not be built, or failed in a way unrelated to the
    /// connection.
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() || err.is_request() || err.is_body() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// The client could not be constructed from its configuration.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured endpoint is not a valid URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The endpoint is a valid URL but not http(s).
    #[error("Unsupported endpoint scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
