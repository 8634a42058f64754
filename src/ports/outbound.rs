//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ApiResponse, ComicMetadata, DomainError, VkCredentials};
use std::collections::BTreeMap;
use std::path::Path;

/// Extra form parameters of a remote method call, merged after `access_token` and `v`.
pub type MethodParams = BTreeMap<String, String>;

/// Read-only comic API.
#[async_trait::async_trait]
pub trait ComicSource: Send + Sync {
    /// Number of the most recent comic (`num` of the "current" endpoint).
    async fn latest_index(&self) -> Result<i64, DomainError>;

    /// Metadata of comic `id`.
    async fn fetch_metadata(&self, id: i64) -> Result<ComicMetadata, DomainError>;

    /// Raw bytes behind an image URL taken from `ComicMetadata::image_url`.
    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, DomainError>;
}

/// Token-authenticated social API.
#[async_trait::async_trait]
pub trait SocialApi: Send + Sync {
    /// Call remote method `method` with `access_token`, `v` and `params`.
    ///
    /// Transport failures are `Err`; an `error` payload is `Ok(ApiResponse::Failure)`.
    async fn call(
        &self,
        method: &str,
        credentials: &VkCredentials,
        params: &MethodParams,
    ) -> Result<ApiResponse, DomainError>;

    /// POST `file_path` as multipart field `photo` to an upload URL. Returns the parsed JSON body.
    async fn upload_photo(
        &self,
        upload_url: &str,
        file_path: &Path,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Source of random integers for comic selection.
pub trait RandomSource: Send + Sync {
    fn next_u64(&self) -> Result<u64, DomainError>;
}
