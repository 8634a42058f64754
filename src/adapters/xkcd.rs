//! xkcd adapter. Implements ComicSource over the public JSON API.
//!
//! - `GET /info.0.json` → `{num}`
//! - `GET /<id>/info.0.json` → `{img, safe_title, alt}`

use crate::adapters::http::{build_client, send_checked, send_json};
use crate::domain::{ComicMetadata, DomainError};
use crate::ports::ComicSource;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_COMIC_API_URL: &str = "https://xkcd.com";

pub struct XkcdAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl XkcdAdapter {
    /// Create an adapter for the comic API at `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
        })
    }

    fn latest_url(&self) -> String {
        format!("{}/info.0.json", self.base_url)
    }

    fn comic_url(&self, id: i64) -> String {
        format!("{}/{}/info.0.json", self.base_url, id)
    }
}

fn parse_latest(body: &Value) -> Result<i64, DomainError> {
    body.get("num")
        .and_then(Value::as_i64)
        .ok_or_else(|| DomainError::DataFormat("comic index has no integer `num`".to_string()))
}

fn required_str(body: &Value, field: &str) -> Result<String, DomainError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DomainError::DataFormat(format!("comic metadata has no string `{}`", field)))
}

fn parse_metadata(id: i64, body: &Value) -> Result<ComicMetadata, DomainError> {
    Ok(ComicMetadata {
        id: body.get("num").and_then(Value::as_i64).unwrap_or(id),
        image_url: required_str(body, "img")?,
        title: required_str(body, "safe_title")?,
        caption: required_str(body, "alt")?,
    })
}

#[async_trait::async_trait]
impl ComicSource for XkcdAdapter {
    async fn latest_index(&self) -> Result<i64, DomainError> {
        let body = send_json(self.client.get(self.latest_url()), "comic index").await?;
        parse_latest(&body)
    }

    async fn fetch_metadata(&self, id: i64) -> Result<ComicMetadata, DomainError> {
        let body = send_json(self.client.get(self.comic_url(id)), "comic metadata").await?;
        let meta = parse_metadata(id, &body)?;
        debug!(id, title = %meta.title, img = %meta.image_url, "fetched comic metadata");
        Ok(meta)
    }

    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, DomainError> {
        let response = send_checked(self.client.get(image_url), "comic image").await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::Transport(format!("read comic image: {}", e)))?;
        Ok(bytes.to_vec())
    }
}
