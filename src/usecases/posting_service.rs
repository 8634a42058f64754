//! One posting run: download -> upload URL -> upload -> save photo -> wall post -> cleanup.
//!
//! - Scratch directory is acquired before anything else and removed on every exit path
//! - No retries: the first error aborts the run (after cleanup)

use crate::domain::{DomainError, VkCredentials};
use crate::ports::SocialApi;
use crate::shared::ScratchDir;
use crate::usecases::{ComicService, publish_flow, upload_flow};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Posting service. Runs the pipeline once per `run()`.
pub struct PostingService {
    comics: ComicService,
    api: Arc<dyn SocialApi>,
    credentials: VkCredentials,
    group_id: u64,
    scratch_dir: PathBuf,
}

impl PostingService {
    pub fn new(
        comics: ComicService,
        api: Arc<dyn SocialApi>,
        credentials: VkCredentials,
        group_id: u64,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            comics,
            api,
            credentials,
            group_id,
            scratch_dir,
        }
    }

    /// Post one random comic. The scratch directory is gone when this returns.
    pub async fn run(&self) -> Result<PostStats, DomainError> {
        let scratch = ScratchDir::acquire(&self.scratch_dir).await?;
        let outcome = self.post_random_comic(&scratch).await;
        let cleanup = scratch.release().await;

        if let Err(e) = &cleanup {
            error!(error = %e, "scratch directory cleanup failed");
        }
        let stats = outcome?;
        cleanup?;
        Ok(stats)
    }

    async fn post_random_comic(&self, scratch: &ScratchDir) -> Result<PostStats, DomainError> {
        let api = self.api.as_ref();

        let comic = self.comics.fetch_random(scratch.path()).await?;
        let upload_url = upload_flow::request_upload_url(api, &self.credentials).await?;
        let uploaded = upload_flow::upload(api, &comic.local_file_path, &upload_url).await?;
        let saved = publish_flow::save_photo(api, &self.credentials, &uploaded).await?;
        let post_id =
            publish_flow::publish(api, &self.credentials, self.group_id, &saved, &comic.caption)
                .await?;

        info!(group_id = self.group_id, post_id = ?post_id, "comic posted");

        Ok(PostStats {
            attachment: saved.attachment(),
            post_id,
        })
    }
}

/// Result of a successful run.
#[derive(Debug)]
pub struct PostStats {
    pub attachment: String,
    pub post_id: Option<i64>,
}
