//! Application configuration. VK credentials, target group, scratch path, endpoints.

use crate::adapters::vk::client::DEFAULT_VK_API_URL;
use crate::adapters::xkcd::DEFAULT_COMIC_API_URL;
use crate::domain::{DomainError, VkCredentials};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_VK_API_VERSION: &str = "5.131";
pub const DEFAULT_TEMP_IMG_FOLDER: &str = "./comics";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Raw settings as read from the environment / optional config file. Every field is optional;
/// `into_posting_config` decides what is required.
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// VK access token. Read from VK_ACCESS_TOKEN.
    #[serde(default)]
    pub vk_access_token: Option<String>,

    /// VK API version sent as `v`. Read from VK_API_VERSION.
    #[serde(default)]
    pub vk_api_version: Option<String>,

    /// Group to post to (positive id; sign-flipped for `owner_id`). Read from USER_GROUP_ID.
    #[serde(default)]
    pub user_group_id: Option<String>,

    /// Scratch directory for the downloaded image. Read from TEMP_IMG_FOLDER.
    #[serde(default)]
    pub temp_img_folder: Option<String>,

    /// Comic API base URL. Read from COMIC_API_URL.
    #[serde(default)]
    pub comic_api_url: Option<String>,

    /// VK API base URL. Read from VK_API_URL.
    #[serde(default)]
    pub vk_api_url: Option<String>,

    /// Per-request timeout in seconds. Read from REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<String>,

    /// Log VK calls instead of sending them. Read from DRY_RUN.
    #[serde(default)]
    pub dry_run: Option<String>,
}

/// Validated configuration, built once at startup and handed to the components.
#[derive(Debug, Clone)]
pub struct PostingConfig {
    pub credentials: VkCredentials,
    pub group_id: u64,
    pub temp_img_folder: PathBuf,
    pub comic_api_url: String,
    pub vk_api_url: String,
    pub request_timeout: Duration,
    pub dry_run: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("XKCD_VK_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // Environment wins over the file. Keys are lowercased (VK_ACCESS_TOKEN -> vk_access_token).
        c = c.add_source(config::Environment::default());
        c.build()?.try_deserialize()
    }

    /// Returns the API version. Defaults to DEFAULT_VK_API_VERSION.
    pub fn vk_api_version_or_default(&self) -> String {
        non_empty(&self.vk_api_version).unwrap_or_else(|| DEFAULT_VK_API_VERSION.to_string())
    }

    /// Returns the scratch directory. Defaults to DEFAULT_TEMP_IMG_FOLDER.
    pub fn temp_img_folder_or_default(&self) -> PathBuf {
        PathBuf::from(
            non_empty(&self.temp_img_folder).unwrap_or_else(|| DEFAULT_TEMP_IMG_FOLDER.to_string()),
        )
    }

    /// Returns the per-request timeout. Defaults to 30 seconds; 0 or garbage is treated as unset.
    pub fn request_timeout_or_default(&self) -> Duration {
        let secs = non_empty(&self.request_timeout_secs)
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn is_dry_run(&self) -> bool {
        non_empty(&self.dry_run).is_some_and(|s| parse_flag(&s))
    }

    /// Validate and freeze. The token may be empty only in dry-run mode.
    pub fn into_posting_config(self) -> Result<PostingConfig, DomainError> {
        let dry_run = self.is_dry_run();

        let access_token = match non_empty(&self.vk_access_token) {
            Some(token) => token,
            None if dry_run => String::new(),
            None => {
                return Err(DomainError::Config(
                    "Set VK_ACCESS_TOKEN (env or .env)".to_string(),
                ));
            }
        };

        let group_raw = non_empty(&self.user_group_id)
            .ok_or_else(|| DomainError::Config("Set USER_GROUP_ID (env or .env)".to_string()))?;
        let group_id = parse_group_id(&group_raw)?;

        Ok(PostingConfig {
            credentials: VkCredentials {
                access_token,
                api_version: self.vk_api_version_or_default(),
            },
            group_id,
            temp_img_folder: self.temp_img_folder_or_default(),
            comic_api_url: non_empty(&self.comic_api_url)
                .unwrap_or_else(|| DEFAULT_COMIC_API_URL.to_string()),
            vk_api_url: non_empty(&self.vk_api_url)
                .unwrap_or_else(|| DEFAULT_VK_API_URL.to_string()),
            request_timeout: self.request_timeout_or_default(),
            dry_run,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Group ids are positive. A leading `-` (owner-id form) is accepted and stripped.
fn parse_group_id(raw: &str) -> Result<u64, DomainError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    match digits.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::Config(format!(
            "USER_GROUP_ID must be a positive integer, got {:?}",
            raw
        ))),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
