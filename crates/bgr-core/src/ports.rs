//! Port definitions for infrastructure the core depends on.
//!
//! The controller only knows the [`RemovalPort`] trait; the HTTP client
//! lives in `bgr-client` and tests substitute fakes or mocks.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{RemovalOptions, SourceImage};
use crate::error::ApiResult;

/// Removes the background from one image.
///
/// Implementations perform a single, non-retrying call and return the
/// processed image bytes as-is. Every failure is reported as an
/// [`ApiError`](crate::ApiError) from the shared taxonomy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemovalPort: Send + Sync {
    /// Submit `image` for background removal.
    async fn remove_background(
        &self,
        image: &SourceImage,
        options: &RemovalOptions,
    ) -> ApiResult<Bytes>;
}
