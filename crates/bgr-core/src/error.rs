//! Failure taxonomy shared by the removal client, the state machine and
//! every presentation adapter.
//!
//! An [`ApiError`] is terminal for the current processing attempt but never
//! fatal to the application: adapters show the message, offer a retry when
//! [`ApiError::retryable`] is set, and otherwise wait for the next user
//! action.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for removal operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Kind of failure reported to the user.
///
/// Serialized as `INVALID_API_KEY`, `FILE_TOO_LARGE`, ... so the wire form
/// matches what the removal service and existing front ends use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    /// The credential was rejected (401) or denied access (403).
    InvalidApiKey,
    /// The account has no credits left (402).
    InsufficientCredits,
    /// The file is not JPEG/PNG/WEBP, or the service rejected it (400).
    UnsupportedFormat,
    /// The file exceeds [`crate::MAX_FILE_SIZE`].
    FileTooLarge,
    /// Timeout, DNS or connection failure.
    NetworkError,
    /// Server-side or otherwise unclassified failure.
    ProcessingError,
}

impl ApiErrorKind {
    /// Whether a failure of this kind can succeed when attempted again.
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::NetworkError | Self::ProcessingError)
    }

    /// Wire name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::InsufficientCredits => "INSUFFICIENT_CREDITS",
            Self::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::NetworkError => "NETWORK_ERROR",
            Self::ProcessingError => "PROCESSING_ERROR",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, user-presentable failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Failure category.
    #[serde(rename = "type")]
    pub kind: ApiErrorKind,
    /// Human-readable description.
    pub message: String,
    /// HTTP status of the response that caused the failure, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Whether the user should be offered a retry.
    pub retryable: bool,
}

impl ApiError {
    /// Create an error whose retryability follows from its kind.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            retryable: kind.is_retryable(),
        }
    }

    /// Attach the HTTP status that produced this error.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    /// The file is larger than the service accepts.
    pub fn file_too_large() -> Self {
        Self::new(ApiErrorKind::FileTooLarge, "File size must be less than 12MB")
    }

    /// The file's media type is not one of the supported formats.
    pub fn unsupported_format() -> Self {
        Self::new(
            ApiErrorKind::UnsupportedFormat,
            "Supported formats: JPEG, PNG, WEBP",
        )
    }

    /// No response arrived within the request timeout.
    pub fn timeout() -> Self {
        Self::new(
            ApiErrorKind::NetworkError,
            "Request timeout - please try again",
        )
    }

    /// Transport-level failure (DNS, connect, reset).
    pub fn network(detail: impl fmt::Display) -> Self {
        Self::new(
            ApiErrorKind::NetworkError,
            format!("Network error - please check your connection ({detail})"),
        )
    }

    /// Processing was requested before any image was selected.
    pub fn no_image_selected() -> Self {
        Self::new(
            ApiErrorKind::ProcessingError,
            "Please select an image to process",
        )
    }

    /// Catch-all for failures that fit no other kind.
    pub fn unexpected() -> Self {
        Self::new(
            ApiErrorKind::ProcessingError,
            "An unexpected error occurred",
        )
    }
}
