//! Mapping of non-success HTTP responses onto the `ApiError` taxonomy.

use bgr_core::{ApiError, ApiErrorKind};
use serde::Deserialize;

/// Error body shape returned by the removal API:
/// `{"errors":[{"title":"..."}]}` or `{"message":"..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    title: Option<String>,
}

/// Extract a human-readable message from an error body.
///
/// Prefers `errors[0].title`, then `message`. Returns `None` when the body
/// is not JSON or neither field holds a non-blank string.
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let non_blank = |s: &String| !s.trim().is_empty();

    parsed
        .errors
        .into_iter()
        .next()
        .and_then(|entry| entry.title)
        .filter(non_blank)
        .or_else(|| parsed.message.filter(non_blank))
}

/// Build the error for a non-success response.
///
/// | status | kind | message |
/// |---|---|---|
/// | 400 | `UNSUPPORTED_FORMAT` | body, else default |
/// | 401 | `INVALID_API_KEY` | fixed |
/// | 402 | `INSUFFICIENT_CREDITS` | fixed |
/// | 403 | `INVALID_API_KEY` | fixed |
/// | 429 | `PROCESSING_ERROR` | fixed |
/// | 500/502/503 | `PROCESSING_ERROR` | fixed |
/// | other | `PROCESSING_ERROR` | body, else default |
pub fn error_for_status(status: u16, body: &[u8]) -> ApiError {
    let (kind, message) = match status {
        400 => (
            ApiErrorKind::UnsupportedFormat,
            extract_error_message(body)
                .unwrap_or_else(|| "Invalid image format or corrupted file".to_string()),
        ),
        401 => (
            ApiErrorKind::InvalidApiKey,
            "Invalid API key - please check your credentials".to_string(),
        ),
        402 => (
            ApiErrorKind::InsufficientCredits,
            "Insufficient API credits - please upgrade your plan".to_string(),
        ),
        403 => (
            ApiErrorKind::InvalidApiKey,
            "API key access denied".to_string(),
        ),
        429 => (
            ApiErrorKind::ProcessingError,
            "Rate limit exceeded - please try again later".to_string(),
        ),
        500 | 502 | 503 => (
            ApiErrorKind::ProcessingError,
            "Server error - please try again later".to_string(),
        ),
        _ => (
            ApiErrorKind::ProcessingError,
            extract_error_message(body).unwrap_or_else(|| "Unknown error occurred".to_string()),
        ),
    };

    ApiError::new(kind, message).with_status(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE_BODY: &[u8] = br#"{"errors":[{"title":"File too small","code":"file_too_small"}]}"#;

    #[test]
    fn test_extract_prefers_errors_title() {
        let body = br#"{"errors":[{"title":"Bad image"}],"message":"ignored"}"#;
        assert_eq!(extract_error_message(body), Some("Bad image".to_string()));
    }

    #[test]
    fn test_extract_falls_back_to_message() {
        assert_eq!(
            extract_error_message(br#"{"message":"Quota"}"#),
            Some("Quota".to_string())
        );
        assert_eq!(
            extract_error_message(br#"{"errors":[],"message":"Quota"}"#),
            Some("Quota".to_string())
        );
        assert_eq!(
            extract_error_message(br#"{"errors":[{"title":""}],"message":"Quota"}"#),
            Some("Quota".to_string())
        );
    }

    #[test]
    fn test_extract_handles_garbage() {
        assert_eq!(extract_error_message(b"<html>Bad Gateway</html>"), None);
        assert_eq!(extract_error_message(b""), None);
        assert_eq!(extract_error_message(br#"{"detail":"x"}"#), None);
        assert_eq!(extract_error_message(br#"{"errors":"flat"}"#), None);
    }

    #[test]
    fn test_400_uses_body_or_default() {
        let err = error_for_status(400, TITLE_BODY);
        assert_eq!(err.kind, ApiErrorKind::UnsupportedFormat);
        assert_eq!(err.message, "File too small");
        assert!(!err.retryable);
        assert_eq!(err.status_code, Some(400));

        let err = error_for_status(400, b"");
        assert_eq!(err.message, "Invalid image format or corrupted file");
    }

    #[test]
    fn test_auth_statuses() {
        let err = error_for_status(401, TITLE_BODY);
        assert_eq!(err.kind, ApiErrorKind::InvalidApiKey);
        assert_eq!(err.message, "Invalid API key - please check your credentials");
        assert!(!err.retryable);

        let err = error_for_status(403, b"");
        assert_eq!(err.kind, ApiErrorKind::InvalidApiKey);
        assert_eq!(err.message, "API key access denied");
        assert!(!err.retryable);
    }

    #[test]
    fn test_402_insufficient_credits() {
        let err = error_for_status(402, b"{}");
        assert_eq!(err.kind, ApiErrorKind::InsufficientCredits);
        assert!(!err.retryable);
    }

    #[test]
    fn test_retryable_server_side_statuses() {
        let err = error_for_status(429, TITLE_BODY);
        assert_eq!(err.kind, ApiErrorKind::ProcessingError);
        assert_eq!(err.message, "Rate limit exceeded - please try again later");
        assert!(err.retryable);

        for status in [500, 502, 503] {
            let err = error_for_status(status, TITLE_BODY);
            assert_eq!(err.kind, ApiErrorKind::ProcessingError);
            assert_eq!(err.message, "Server error - please try again later");
            assert!(err.retryable);
            assert_eq!(err.status_code, Some(status));
        }
    }

    #[test]
    fn test_other_status_uses_body_or_default() {
        let err = error_for_status(504, br#"{"message":"Upstream timeout"}"#);
        assert_eq!(err.kind, ApiErrorKind::ProcessingError);
        assert_eq!(err.message, "Upstream timeout");
        assert!(err.retryable);

        let err = error_for_status(418, b"teapot");
        assert_eq!(err.message, "Unknown error occurred");
        assert_eq!(err.status_code, Some(418));
    }
}
