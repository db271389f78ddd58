#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod mapping;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultRemovalClient, RemovalClient};

// Configuration
pub use config::{API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, RemovalClientConfig};

// Errors
pub use error::{ClientError, TransportError};

// Transport seam
pub use http::{API_KEY_HEADER, FormRequest, HttpBackend, IMAGE_FIELD, RawResponse, ReqwestBackend};

// Response mapping
pub use mapping::{error_for_status, extract_error_message};

