//! Removal client: local validation, one timed request, error mapping.

use std::time::Duration;

use bgr_core::{ApiError, ApiResult, RemovalOptions, SourceImage};
use bytes::Bytes;
use tracing::{debug, warn};

use crate::config::RemovalClientConfig;
use crate::error::{ClientError, TransportError};
use crate::http::{FormRequest, HttpBackend, ReqwestBackend};
use crate::mapping::error_for_status;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default removal client using the reqwest HTTP backend.
pub type DefaultRemovalClient = RemovalClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Stateless client for the background removal API.
///
/// Generic over an HTTP backend so tests can inject canned responses. Use
/// `DefaultRemovalClient` in production code.
pub struct RemovalClient<B: HttpBackend> {
    backend: B,
    timeout: Duration,
}

impl DefaultRemovalClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &RemovalClientConfig) -> Result<Self, ClientError> {
        let backend = ReqwestBackend::new(config)?;
        Ok(Self {
            backend,
            timeout: config.timeout,
        })
    }
}

impl<B: HttpBackend> RemovalClient<B> {
    /// Create a client around a custom backend.
    ///
    /// The timeout is enforced here as well as in the backend, so a backend
    /// that never answers still fails after `timeout`.
    pub const fn with_backend(backend: B, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Validate `image`, post it once, and return the response body as-is.
    pub async fn submit(&self, image: &SourceImage, options: &RemovalOptions) -> ApiResult<Bytes> {
        image.validate()?;

        let request = FormRequest::new(image, options);
        debug!(
            file = %request.file_name,
            media_type = %request.media_type,
            size = request.image.len(),
            fields = ?request.fields,
            "Posting removal request"
        );

        let response = match tokio::time::timeout(self.timeout, self.backend.post_form(&request)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(TransportError::Timeout)) | Err(_) => {
                warn!(timeout = ?self.timeout, "Removal request timed out");
                return Err(ApiError::timeout());
            }
            Ok(Err(err @ TransportError::Connect(_))) => {
                warn!(error = %err, "Removal request failed");
                return Err(ApiError::network(err));
            }
            Ok(Err(err @ TransportError::Request(_))) => {
                warn!(error = %err, "Removal request failed unexpectedly");
                return Err(ApiError::unexpected());
            }
        };

        if response.is_success() {
            debug!(
                status = response.status,
                bytes = response.body.len(),
                "Removal request succeeded"
            );
            return Ok(response.body);
        }

        let error = error_for_status(response.status, &response.body);
        debug!(status = response.status, kind = %error.kind, "Removal API returned an error");
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use bgr_core::{ApiErrorKind, MAX_FILE_SIZE, OutputFormat, OutputSize};
    use tokio_test::{assert_err, assert_ok};

    const TIMEOUT: Duration = Duration::from_millis(30_000);

    fn client(backend: FakeBackend) -> RemovalClient<FakeBackend> {
        RemovalClient::with_backend(backend, TIMEOUT)
    }

    fn jpeg(size: usize) -> SourceImage {
        let mut bytes = vec![0u8; size.max(3)];
        bytes[..3].copy_from_slice(&[0xFF, 0xD8, 0xFF]);
        SourceImage::sniffed("photo.jpg", bytes)
    }

    fn options() -> RemovalOptions {
        RemovalOptions {
            size: OutputSize::Auto,
            format: Some(OutputFormat::Png),
            foreground_type: None,
        }
    }

    #[test]
    fn test_default_client_creation() {
        let config = RemovalClientConfig::new().with_api_key("key");
        let client = DefaultRemovalClient::new(&config).unwrap();
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_success_returns_body_unchanged() {
        let body: &'static [u8] = b"not even an image";
        let client = client(FakeBackend::responding(200, body));

        let result = assert_ok!(client.submit(&jpeg(1024), &options()).await);

        assert_eq!(&result[..], body);
        let requests = client.backend().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].field("size"), Some("auto"));
        assert_eq!(requests[0].field("format"), Some("png"));
        assert_eq!(requests[0].image.len(), 1024);
    }

    #[tokio::test]
    async fn test_oversized_file_never_hits_backend() {
        let client = client(FakeBackend::responding(200, "ok"));

        let err = assert_err!(client.submit(&jpeg(MAX_FILE_SIZE + 1), &options()).await);

        assert_eq!(err.kind, ApiErrorKind::FileTooLarge);
        assert!(client.backend().requests().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_type_never_hits_backend() {
        let client = client(FakeBackend::responding(200, "ok"));
        for media_type in ["image/gif", "image/heic", "application/pdf", ""] {
            let image = SourceImage::new("file", media_type, vec![1, 2, 3]);
            let err = assert_err!(client.submit(&image, &options()).await);
            assert_eq!(err.kind, ApiErrorKind::UnsupportedFormat, "{media_type}");
        }
        assert!(client.backend().requests().is_empty());
    }

    #[tokio::test]
    async fn test_401_maps_to_invalid_api_key() {
        let client = client(FakeBackend::responding(
            401,
            r#"{"errors":[{"title":"API Key invalid"}]}"#,
        ));

        let err = assert_err!(client.submit(&jpeg(64), &options()).await);

        assert_eq!(err.kind, ApiErrorKind::InvalidApiKey);
        assert!(!err.retryable);
        assert_eq!(err.status_code, Some(401));
    }

    #[tokio::test]
    async fn test_429_is_retryable_processing_error() {
        let client = client(FakeBackend::responding(429, ""));

        let err = assert_err!(client.submit(&jpeg(64), &options()).await);

        assert_eq!(err.kind, ApiErrorKind::ProcessingError);
        assert!(err.retryable);
    }

    #[tokio::test]
    async fn test_400_carries_service_message() {
        let client = client(FakeBackend::responding(
            400,
            r#"{"errors":[{"title":"Could not identify foreground in image."}]}"#,
        ));

        let err = assert_err!(client.submit(&jpeg(64), &options()).await);

        assert_eq!(err.kind, ApiErrorKind::UnsupportedFormat);
        assert_eq!(err.message, "Could not identify foreground in image.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_backend_times_out() {
        let client = client(
            FakeBackend::responding(200, "late").with_delay(Duration::from_secs(31)),
        );

        let err = assert_err!(client.submit(&jpeg(64), &options()).await);

        assert_eq!(err.kind, ApiErrorKind::NetworkError);
        assert_eq!(err.message, "Request timeout - please try again");
        assert!(err.retryable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_just_inside_timeout_succeeds() {
        let client = client(
            FakeBackend::responding(200, "on time").with_delay(Duration::from_millis(29_999)),
        );

        assert_ok!(client.submit(&jpeg(64), &options()).await);
    }

    #[tokio::test]
    async fn test_backend_timeout_maps_to_timeout_error() {
        let client = client(FakeBackend::failing(TransportError::Timeout));

        let err = assert_err!(client.submit(&jpeg(64), &options()).await);

        assert_eq!(err, ApiError::timeout());
    }

    #[tokio::test]
    async fn test_connect_failure_is_retryable_network_error() {
        let client = client(FakeBackend::failing(TransportError::Connect(
            "dns error: no such host".to_string(),
        )));

        let err = assert_err!(client.submit(&jpeg(64), &options()).await);

        assert_eq!(err.kind, ApiErrorKind::NetworkError);
        assert!(err.retryable);
        assert!(err.status_code.is_none());
    }

    #[tokio::test]
    async fn test_request_failure_is_unexpected_error() {
        let client = client(FakeBackend::failing(TransportError::Request(
            "invalid mime type".to_string(),
        )));

        let err = assert_err!(client.submit(&jpeg(64), &options()).await);

        assert_eq!(err, ApiError::unexpected());
        assert_eq!(err.kind, ApiErrorKind::ProcessingError);
        assert!(err.retryable);
        assert_eq!(client.backend().requests().len(), 1);
    }
}
