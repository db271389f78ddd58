//! HTTP backend abstraction for the removal API.
//!
//! The client talks to the network only through [`HttpBackend`], so tests
//! can substitute canned responses. The production implementation uses
//! reqwest and posts a multipart form.

use async_trait::async_trait;
use bgr_core::{RemovalOptions, SourceImage};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::config::RemovalClientConfig;
use crate::error::{ClientError, TransportError};

/// Header carrying the API credential.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Form field holding the image bytes.
pub const IMAGE_FIELD: &str = "image_file";

// ============================================================================
// Request / Response
// ============================================================================

/// Everything needed to build the multipart body of one removal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    pub file_name: String,
    pub media_type: String,
    pub image: Bytes,
    /// Text fields in send order: `size`, then optional `type` and `format`.
    pub fields: Vec<(&'static str, String)>,
}

impl FormRequest {
    pub fn new(image: &SourceImage, options: &RemovalOptions) -> Self {
        let mut fields = vec![("size", options.size.to_string())];
        if let Some(foreground_type) = options.foreground_type {
            fields.push(("type", foreground_type.to_string()));
        }
        if let Some(format) = options.format {
            fields.push(("format", format.to_string()));
        }

        Self {
            file_name: image.file_name().to_string(),
            media_type: image.media_type().to_string(),
            image: image.bytes().clone(),
            fields,
        }
    }

    /// Value of a text field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Status and full body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can post a removal form.
///
/// Implementations report any response, success or not, as a
/// [`RawResponse`]; only the absence of a response is a [`TransportError`].
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn post_form(&self, request: &FormRequest) -> Result<RawResponse, TransportError>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// One request per call, no retries.
pub struct ReqwestBackend {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &RemovalClientConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientError::UnsupportedScheme(endpoint.scheme().to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    fn build_form(request: &FormRequest) -> Result<Form, TransportError> {
        let part = Part::bytes(request.image.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(&request.media_type)
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let form = request
            .fields
            .iter()
            .fold(Form::new().part(IMAGE_FIELD, part), |form, (name, value)| {
                form.text(*name, value.clone())
            });
        Ok(form)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_form(&self, request: &FormRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .multipart(Self::build_form(request)?);
        if let Some(ref key) = self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(RawResponse { status, body })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
