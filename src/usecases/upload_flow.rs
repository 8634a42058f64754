//! Photo upload: ask VK for an upload URL, POST the file there, parse the identifiers.

use crate::domain::{DomainError, UploadResult, VkCredentials};
use crate::ports::{MethodParams, SocialApi};
use serde_json::Value;
use std::path::Path;
use tracing::info;

pub const GET_WALL_UPLOAD_SERVER: &str = "photos.getWallUploadServer";

/// Short-lived URL that accepts the wall photo upload.
pub async fn request_upload_url(
    api: &dyn SocialApi,
    credentials: &VkCredentials,
) -> Result<String, DomainError> {
    let response = api
        .call(GET_WALL_UPLOAD_SERVER, credentials, &MethodParams::new())
        .await?
        .into_result(GET_WALL_UPLOAD_SERVER)?;

    response
        .get("upload_url")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            DomainError::DataFormat(format!("{} response has no `upload_url`", GET_WALL_UPLOAD_SERVER))
        })
}

/// Upload `file_path` and return the `server`/`photo`/`hash` triple.
pub async fn upload(
    api: &dyn SocialApi,
    file_path: &Path,
    upload_url: &str,
) -> Result<UploadResult, DomainError> {
    let body = api.upload_photo(upload_url, file_path).await?;
    let result = parse_upload_body(&body)?;
    info!(server = %result.server, path = %file_path.display(), "photo uploaded");
    Ok(result)
}

fn parse_upload_body(body: &Value) -> Result<UploadResult, DomainError> {
    Ok(UploadResult {
        server: scalar_field(body, "server")?,
        photo_payload: scalar_field(body, "photo")?,
        hash: scalar_field(body, "hash")?,
    })
}

/// Strings as-is, numbers in decimal. Anything else counts as missing.
fn scalar_field(body: &Value, field: &str) -> Result<String, DomainError> {
    match body.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(DomainError::DataFormat(format!(
            "upload response has no `{}`",
            field
        ))),
    }
}
