//! Scratch directory for downloaded comics. Created on acquire, removed on release.
//!
//! `release()` is the normal path. If the guard is dropped without it (early return,
//! panic unwinding), `Drop` removes the directory synchronously.

use crate::domain::DomainError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub struct ScratchDir {
    path: PathBuf,
    released: bool,
}

impl ScratchDir {
    /// Create `path` (and parents) if absent and take ownership of its removal.
    pub async fn acquire(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| DomainError::Io(format!("create {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "scratch directory ready");
        Ok(Self {
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and everything in it. Already-missing is fine.
    pub async fn release(mut self) -> Result<(), DomainError> {
        self.released = true;
        match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "scratch directory removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Io(format!(
                "remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "scratch directory removed on drop"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => error!(path = %self.path.display(), error = %e, "failed to remove scratch directory"),
        }
    }
}
