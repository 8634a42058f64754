//! In-memory port implementations for use-case tests.

use crate::domain::{ApiResponse, ComicMetadata, DomainError, VkCredentials};
use crate::ports::{ComicSource, MethodParams, RandomSource, SocialApi};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeComicSource {
    pub latest: i64,
    pub comics: HashMap<i64, ComicMetadata>,
    pub images: HashMap<String, Vec<u8>>,
    pub requested: Mutex<Vec<i64>>,
}

impl FakeComicSource {
    pub fn with_comic(latest: i64, meta: ComicMetadata, image: &[u8]) -> Self {
        let mut source = Self {
            latest,
            ..Default::default()
        };
        source.images.insert(meta.image_url.clone(), image.to_vec());
        source.comics.insert(meta.id, meta);
        source
    }
}

#[async_trait::async_trait]
impl ComicSource for FakeComicSource {
    async fn latest_index(&self) -> Result<i64, DomainError> {
        Ok(self.latest)
    }

    async fn fetch_metadata(&self, id: i64) -> Result<ComicMetadata, DomainError> {
        self.requested.lock().unwrap().push(id);
        self.comics
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::Transport(format!("comic metadata returned 404 for {}", id)))
    }

    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, DomainError> {
        self.images
            .get(image_url)
            .cloned()
            .ok_or_else(|| DomainError::Transport(format!("comic image returned 404: {}", image_url)))
    }
}

/// Yields the queued values in order, then repeats the last one.
pub struct SequenceRandom {
    values: Mutex<VecDeque<u64>>,
    last: Mutex<u64>,
}

impl SequenceRandom {
    pub fn new(values: &[u64]) -> Self {
        Self {
            values: Mutex::new(values.iter().copied().collect()),
            last: Mutex::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_u64(&self) -> Result<u64, DomainError> {
        let mut last = self.last.lock().unwrap();
        if let Some(v) = self.values.lock().unwrap().pop_front() {
            *last = v;
        }
        Ok(*last)
    }
}

/// Scripted SocialApi that records every call.
#[derive(Default)]
pub struct RecordingSocialApi {
    pub responses: HashMap<String, ApiResponse>,
    pub upload_body: Option<Value>,
    /// Methods that fail with a transport error instead of answering.
    pub broken_methods: Vec<String>,
    pub calls: Mutex<Vec<(String, MethodParams)>>,
    pub uploads: Mutex<Vec<(String, PathBuf)>>,
}

impl RecordingSocialApi {
    pub fn respond(mut self, method: &str, response: ApiResponse) -> Self {
        self.responses.insert(method.to_string(), response);
        self
    }

    pub fn upload_returns(mut self, body: Value) -> Self {
        self.upload_body = Some(body);
        self
    }

    pub fn break_method(mut self, method: &str) -> Self {
        self.broken_methods.push(method.to_string());
        self
    }

    pub fn called_methods(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }

    pub fn params_of(&self, method: &str) -> Option<MethodParams> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
    }
}

#[async_trait::async_trait]
impl SocialApi for RecordingSocialApi {
    async fn call(
        &self,
        method: &str,
        _credentials: &VkCredentials,
        params: &MethodParams,
    ) -> Result<ApiResponse, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params.clone()));
        if self.broken_methods.iter().any(|m| m == method) {
            return Err(DomainError::Transport(format!("{} returned 502", method)));
        }
        Ok(self
            .responses
            .get(method)
            .cloned()
            .unwrap_or(ApiResponse::Success(Value::Null)))
    }

    async fn upload_photo(
        &self,
        upload_url: &str,
        file_path: &Path,
    ) -> Result<Value, DomainError> {
        if !file_path.is_file() {
            return Err(DomainError::Io(format!("missing {}", file_path.display())));
        }
        self.uploads
            .lock()
            .unwrap()
            .push((upload_url.to_string(), file_path.to_path_buf()));
        self.upload_body
            .clone()
            .ok_or_else(|| DomainError::Transport("photo upload returned 500".to_string()))
    }
}

pub fn credentials() -> VkCredentials {
    VkCredentials {
        access_token: "token".to_string(),
        api_version: "5.131".to_string(),
    }
}
