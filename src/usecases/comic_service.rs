//! Random comic download: latest index -> uniform draw -> metadata -> image file.

use crate::domain::{DomainError, DownloadedComic};
use crate::ports::{ComicSource, RandomSource};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub struct ComicService {
    source: Arc<dyn ComicSource>,
    rng: Arc<dyn RandomSource>,
}

impl ComicService {
    pub fn new(source: Arc<dyn ComicSource>, rng: Arc<dyn RandomSource>) -> Self {
        Self { source, rng }
    }

    /// Number of the most recent comic.
    pub async fn get_latest_index(&self) -> Result<i64, DomainError> {
        self.source.latest_index().await
    }

    /// Download a uniformly chosen comic into `destination_dir`. Creates exactly one file there.
    pub async fn fetch_random(&self, destination_dir: &Path) -> Result<DownloadedComic, DomainError> {
        let latest = self.get_latest_index().await?;
        let id = pick_index(self.rng.as_ref(), latest)?;
        let meta = self.source.fetch_metadata(id).await?;

        let ext = image_extension(&meta.image_url);
        let file_name = comic_file_name(&meta.title, id, &ext);
        let bytes = self.source.fetch_image(&meta.image_url).await?;

        let path = destination_dir.join(file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| DomainError::Io(format!("write {}: {}", path.display(), e)))?;

        info!(
            id,
            latest,
            title = %meta.title,
            path = %path.display(),
            size = bytes.len(),
            "downloaded comic"
        );

        Ok(DownloadedComic {
            local_file_path: path,
            caption: meta.caption,
        })
    }
}

/// Uniform draw in `[1, latest]`. Rejection sampling keeps it free of modulo bias.
pub fn pick_index(rng: &dyn RandomSource, latest: i64) -> Result<i64, DomainError> {
    if latest < 1 {
        return Err(DomainError::DataFormat(format!(
            "latest comic index must be positive, got {}",
            latest
        )));
    }
    let n = latest as u64;
    let zone = u64::MAX - u64::MAX % n;
    loop {
        let r = rng.next_u64()?;
        if r < zone {
            return Ok((r % n) as i64 + 1);
        }
    }
}

/// Suffix of the URL's last path segment, without the dot. Query and fragment are ignored.
pub fn image_extension(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or_default();
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, p)| p).unwrap_or_default(),
        None => without_query,
    };
    let segment = path.rsplit('/').next().unwrap_or_default();
    match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
        _ => String::new(),
    }
}

/// `<title>.<ext>` with path separators replaced. Falls back to `comic-<id>` for empty titles.
fn comic_file_name(title: &str, id: i64, ext: &str) -> String {
    let mut stem: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    if stem.trim().is_empty() || stem == "." || stem == ".." {
        stem = format!("comic-{}", id);
    }
    if ext.is_empty() {
        stem
    } else {
        format!("{}.{}", stem, ext)
    }
}
