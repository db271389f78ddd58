//! CLI bootstrap - the composition root.
//!
//! This is the only place where the HTTP client is instantiated. Handlers
//! receive a `CliContext` and talk to the `AppController`.

use std::sync::Arc;
use std::time::Duration;

use bgr_client::{API_KEY_ENV, DefaultRemovalClient, RemovalClientConfig};
use bgr_core::{AppController, RemovalPort};
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Clone, Default)]
pub struct CliConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout: Option<Duration>,
}

impl CliConfig {
    /// Build the client configuration, requiring a non-blank API key.
    pub fn client_config(&self) -> Result<RemovalClientConfig, CliError> {
        let mut config = RemovalClientConfig::new().with_optional_api_key(self.api_key.clone());
        if !config.has_api_key() {
            return Err(CliError::Config(format!(
                "No API key configured. Pass --api-key or set {API_KEY_ENV}."
            )));
        }
        if let Some(ref endpoint) = self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    controller: AppController,
}

impl CliContext {
    /// Wrap an arbitrary removal port. Used by tests.
    pub fn with_port(port: Arc<dyn RemovalPort>) -> Self {
        Self {
            controller: AppController::new(port),
        }
    }

    pub const fn controller(&self) -> &AppController {
        &self.controller
    }
}

/// Wire the HTTP client into a controller.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let client_config = config.client_config()?;
    debug!(?client_config, "Bootstrapping removal client");
    let client = DefaultRemovalClient::new(&client_config)?;
    Ok(CliContext::with_port(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = bootstrap(&CliConfig::default()).err().unwrap();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), 78);

        let blank = CliConfig {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(bootstrap(&blank), Err(CliError::Config(_))));
    }

    #[test]
    fn test_client_config_applies_overrides() {
        let config = CliConfig {
            api_key: Some("key".into()),
            endpoint: Some("http://localhost:9999/removebg".into()),
            timeout: Some(Duration::from_secs(5)),
        };
        let client_config = config.client_config().unwrap();
        assert_eq!(client_config.endpoint(), "http://localhost:9999/removebg");
        assert_eq!(client_config.timeout(), Duration::from_secs(5));
        assert!(client_config.has_api_key());
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let config = CliConfig {
            api_key: Some("key".into()),
            endpoint: Some("not a url".into()),
            timeout: None,
        };
        assert!(matches!(bootstrap(&config), Err(CliError::Config(_))));
    }

    #[test]
    fn test_bootstrap_starts_idle() {
        let config = CliConfig {
            api_key: Some("key".into()),
            ..Default::default()
        };
        let ctx = bootstrap(&config).unwrap();
        assert!(ctx.controller().state().images.original.is_none());
    }
}
