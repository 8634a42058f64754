//! VK adapter. Implements SocialApi over the VK REST API.
//!
//! Every method is a form POST to `<base>/method/<name>` carrying `access_token` and `v`.
//! The JSON body holds either `response` or `error`; both are returned as `ApiResponse`.

use crate::adapters::http::{build_client, send_json};
use crate::domain::{ApiResponse, DomainError, VkCredentials};
use crate::ports::{MethodParams, SocialApi};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_VK_API_URL: &str = "https://api.vk.com";

pub struct VkClient {
    client: reqwest::Client,
    base_url: String,
}

impl VkClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/method/{}", self.base_url, method)
    }
}

/// Form body: credentials first, then extra params. Extra params may not override credentials.
fn method_form(credentials: &VkCredentials, params: &MethodParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("access_token".to_string(), credentials.access_token.clone()),
        ("v".to_string(), credentials.api_version.clone()),
    ];
    form.extend(
        params
            .iter()
            .filter(|(k, _)| k.as_str() != "access_token" && k.as_str() != "v")
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    form
}

/// Split a decoded method body into `Success`/`Failure`. Logs the remote message on failure.
pub(crate) fn parse_method_body(method: &str, body: Value) -> Result<ApiResponse, DomainError> {
    if let Some(error) = body.get("error") {
        let code = error.get("error_code").and_then(Value::as_i64).unwrap_or(0);
        let message = error
            .get("error_msg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        warn!(method, code, "VK API returned an error: {}", message);
        return Ok(ApiResponse::Failure { code, message });
    }

    match body {
        Value::Object(mut map) => match map.remove("response") {
            Some(response) => Ok(ApiResponse::Success(response)),
            None => Err(DomainError::DataFormat(format!(
                "{} returned neither `response` nor `error`",
                method
            ))),
        },
        _ => Err(DomainError::DataFormat(format!(
            "{} returned a non-object body",
            method
        ))),
    }
}

#[async_trait::async_trait]
impl SocialApi for VkClient {
    async fn call(
        &self,
        method: &str,
        credentials: &VkCredentials,
        params: &MethodParams,
    ) -> Result<ApiResponse, DomainError> {
        debug!(method, params = ?params.keys().collect::<Vec<_>>(), "calling VK method");
        let request = self
            .client
            .post(self.method_url(method))
            .form(&method_form(credentials, params));
        let body = send_json(request, method).await?;
        parse_method_body(method, body)
    }

    async fn upload_photo(
        &self,
        upload_url: &str,
        file_path: &Path,
    ) -> Result<Value, DomainError> {
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|e| DomainError::Io(format!("read {}: {}", file_path.display(), e)))?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        debug!(path = %file_path.display(), size = bytes.len(), "uploading photo");

        let form = Form::new().part("photo", Part::bytes(bytes).file_name(file_name));
        send_json(self.client.post(upload_url).multipart(form), "photo upload").await
    }
}
