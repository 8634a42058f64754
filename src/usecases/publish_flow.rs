//! Publishing: save the uploaded photo to the wall album, then post it on the group wall.

use crate::domain::{DomainError, SavedPhotoRef, UploadResult, VkCredentials};
use crate::ports::{MethodParams, SocialApi};
use serde_json::Value;
use tracing::info;

pub const SAVE_WALL_PHOTO: &str = "photos.saveWallPhoto";
pub const WALL_POST: &str = "wall.post";

/// Save an uploaded photo. Returns the first saved photo's id and owner.
pub async fn save_photo(
    api: &dyn SocialApi,
    credentials: &VkCredentials,
    upload: &UploadResult,
) -> Result<SavedPhotoRef, DomainError> {
    let params = MethodParams::from([
        ("server".to_string(), upload.server.clone()),
        ("photo".to_string(), upload.photo_payload.clone()),
        ("hash".to_string(), upload.hash.clone()),
    ]);
    let response = api
        .call(SAVE_WALL_PHOTO, credentials, &params)
        .await?
        .into_result(SAVE_WALL_PHOTO)?;

    let saved = parse_saved_photo(&response)?;
    info!(photo_id = saved.photo_id, owner_id = saved.owner_id, "photo saved");
    Ok(saved)
}

fn parse_saved_photo(response: &Value) -> Result<SavedPhotoRef, DomainError> {
    let first = response
        .as_array()
        .and_then(|photos| photos.first())
        .ok_or_else(|| {
            DomainError::DataFormat(format!("{} response is not a non-empty list", SAVE_WALL_PHOTO))
        })?;
    let field = |name: &str| {
        first.get(name).and_then(Value::as_i64).ok_or_else(|| {
            DomainError::DataFormat(format!("{} response has no integer `{}`", SAVE_WALL_PHOTO, name))
        })
    };
    Ok(SavedPhotoRef {
        photo_id: field("id")?,
        owner_id: field("owner_id")?,
    })
}

/// Post `caption` with the saved photo on the wall of group `group_id`, as the group.
///
/// Returns the new post id when VK reports one.
pub async fn publish(
    api: &dyn SocialApi,
    credentials: &VkCredentials,
    group_id: u64,
    saved: &SavedPhotoRef,
    caption: &str,
) -> Result<Option<i64>, DomainError> {
    let params = wall_post_params(group_id, saved, caption);
    let response = api
        .call(WALL_POST, credentials, &params)
        .await?
        .into_result(WALL_POST)?;

    let post_id = response.get("post_id").and_then(Value::as_i64);
    info!(group_id, post_id = ?post_id, attachment = %saved.attachment(), "wall post published");
    Ok(post_id)
}

fn wall_post_params(group_id: u64, saved: &SavedPhotoRef, caption: &str) -> MethodParams {
    MethodParams::from([
        ("owner_id".to_string(), format!("-{}", group_id)),
        ("from_group".to_string(), "1".to_string()),
        ("attachments".to_string(), saved.attachment()),
        ("message".to_string(), caption.to_string()),
    ])
}
