//! Domain entities. Pure data structures for the posting pipeline.
//!
//! No HTTP/IO types here. Adapters map wire payloads into these.

use std::path::PathBuf;

/// Metadata of a single comic, as published by the comic API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicMetadata {
    pub id: i64,
    pub image_url: String,
    pub title: String,
    pub caption: String,
}

/// A comic image saved to the scratch directory, plus the caption to post with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedComic {
    pub local_file_path: PathBuf,
    pub caption: String,
}

/// Identifiers returned by the upload server. Only fed into `photos.saveWallPhoto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Upload server id. VK returns a number; kept as text since it is echoed back verbatim.
    pub server: String,
    /// Opaque photo payload (a JSON-encoded string on the VK side).
    pub photo_payload: String,
    pub hash: String,
}

/// A photo saved to the wall album.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedPhotoRef {
    pub photo_id: i64,
    pub owner_id: i64,
}

impl SavedPhotoRef {
    /// Attachment identifier for `wall.post`, e.g. `photo-999_55`.
    pub fn attachment(&self) -> String {
        format!("photo{}_{}", self.owner_id, self.photo_id)
    }
}

/// Token and API version sent with every remote method call.
#[derive(Debug, Clone)]
pub struct VkCredentials {
    pub access_token: String,
    pub api_version: String,
}

/// Outcome of a remote method call that reached the API and returned JSON.
///
/// Callers must match on it: an API-level error is a value, not a missing field.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Contents of the `response` key.
    Success(serde_json::Value),
    /// Contents of the `error` key.
    Failure { code: i64, message: String },
}

impl ApiResponse {
    /// Convert into a `Result`, tagging failures with the method that produced them.
    pub fn into_result(self, method: &str) -> Result<serde_json::Value, super::DomainError> {
        match self {
            ApiResponse::Success(body) => Ok(body),
            ApiResponse::Failure { code, message } => Err(super::DomainError::Api {
                method: method.to_string(),
                code,
                message,
            }),
        }
    }
}
