//! Port trait implementation for `RemovalClient`.

use async_trait::async_trait;
use bgr_core::{ApiResult, RemovalOptions, RemovalPort, SourceImage};
use bytes::Bytes;

use crate::client::RemovalClient;
use crate::http::HttpBackend;

#[async_trait]
impl<B: HttpBackend> RemovalPort for RemovalClient<B> {
    async fn remove_background(
        &self,
        image: &SourceImage,
        options: &RemovalOptions,
    ) -> ApiResult<Bytes> {
        self.submit(image, options).await
    }
}
