//! Public configuration for the removal client.

use std::fmt;
use std::time::Duration;

/// Production endpoint of the remove.bg API.
pub const DEFAULT_ENDPOINT: &str = "https://api.remove.bg/v1.0/removebg";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "REMOVE_BG_API_KEY";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the removal client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use bgr_client::RemovalClientConfig;
/// use std::time::Duration;
///
/// let config = RemovalClientConfig::new()
///     .with_api_key("my-key")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Clone)]
pub struct RemovalClientConfig {
    /// URL the multipart form is posted to
    pub(crate) endpoint: String,
    /// Sent as `X-Api-Key`; omitted when `None`
    pub(crate) api_key: Option<String>,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl Default for RemovalClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("bgr-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for RemovalClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovalClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl RemovalClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with the API key read from
    /// [`API_KEY_ENV`]. A missing key is not an error here; the service
    /// rejects unauthenticated requests.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_optional_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Set the endpoint URL.
    ///
    /// Defaults to [`DEFAULT_ENDPOINT`].
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional API key. Blank keys are treated as absent.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
