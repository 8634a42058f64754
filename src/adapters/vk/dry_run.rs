//! Dry-run VK adapter. Logs calls instead of touching the network.
//!
//! Lets the full pipeline (download, scratch dir, flows) run without a token.

use crate::domain::{ApiResponse, DomainError, VkCredentials};
use crate::ports::{MethodParams, SocialApi};
use serde_json::{Value, json};
use std::path::Path;
use tracing::info;

/// Upload URL handed out by `photos.getWallUploadServer` in dry-run mode.
pub const DRY_RUN_UPLOAD_URL: &str = "dry-run://upload";

#[derive(Debug, Default)]
pub struct DryRunVkAdapter;

impl DryRunVkAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl SocialApi for DryRunVkAdapter {
    async fn call(
        &self,
        method: &str,
        _credentials: &VkCredentials,
        params: &MethodParams,
    ) -> Result<ApiResponse, DomainError> {
        info!(method, params = ?params, "[DRY RUN] VK method call");

        let response = match method {
            "photos.getWallUploadServer" => json!({ "upload_url": DRY_RUN_UPLOAD_URL }),
            "photos.saveWallPhoto" => json!([{ "id": 0, "owner_id": 0 }]),
            "wall.post" => json!({ "post_id": 0 }),
            _ => Value::Null,
        };
        Ok(ApiResponse::Success(response))
    }

    async fn upload_photo(
        &self,
        upload_url: &str,
        file_path: &Path,
    ) -> Result<Value, DomainError> {
        let meta = tokio::fs::metadata(file_path)
            .await
            .map_err(|e| DomainError::Io(format!("stat {}: {}", file_path.display(), e)))?;
        info!(
            upload_url,
            path = %file_path.display(),
            size = meta.len(),
            "[DRY RUN] photo upload"
        );
        Ok(json!({ "server": 0, "photo": "[]", "hash": "dry-run" }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> VkCredentials {
        VkCredentials {
            access_token: String::new(),
            api_version: "5.131".to_string(),
        }
    }

    #[tokio::test]
    async fn test_dry_run_upload_server() {
        let adapter = DryRunVkAdapter::new();
        let resp = adapter
            .call("photos.getWallUploadServer", &creds(), &MethodParams::new())
            .await
            .unwrap();
        assert_eq!(
            resp,
            ApiResponse::Success(json!({ "upload_url": DRY_RUN_UPLOAD_URL }))
        );
    }

    #[tokio::test]
    async fn test_dry_run_upload_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = DryRunVkAdapter::new();

        let missing = adapter
            .upload_photo(DRY_RUN_UPLOAD_URL, &dir.path().join("nope.png"))
            .await;
        assert!(matches!(missing, Err(DomainError::Io(_))));

        let path = dir.path().join("comic.png");
        std::fs::write(&path, b"png").unwrap();
        let body = adapter.upload_photo(DRY_RUN_UPLOAD_URL, &path).await.unwrap();
        assert_eq!(body["hash"], "dry-run");
    }
}
