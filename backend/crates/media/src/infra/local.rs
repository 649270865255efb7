//! Local Disk Storage

use std::io;
use std::path::{Path, PathBuf};

use platform::crypto::random_token;
use tokio::fs;

/// Upload directory plus its staging area
#[derive(Debug, Clone)]
pub struct LocalDisk {
    root: PathBuf,
    staging: PathBuf,
}

impl LocalDisk {
    pub fn new(root: impl Into<PathBuf>, staging: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            staging: staging.into(),
        }
    }

    /// Write bytes to a fresh staging file
    ///
    /// Creates the staging directory if it does not exist yet.
    pub async fn stage(&self, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.staging).await?;

        let path = self.staging.join(format!("{}.part", random_token(18)));
        if let Err(e) = fs::write(&path, bytes).await {
            self.discard(&path).await;
            return Err(e);
        }
        Ok(path)
    }

    /// Move a staged file into the upload directory under `name`
    ///
    /// The staged file is removed if the move fails.
    pub async fn promote(&self, staged: &Path, name: &str) -> io::Result<PathBuf> {
        let target = match self.resolve(name) {
            Some(path) => path,
            None => {
                self.discard(staged).await;
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "invalid storage name",
                ));
            }
        };

        let moved = async {
            fs::create_dir_all(&self.root).await?;
            fs::rename(staged, &target).await
        }
        .await;

        match moved {
            Ok(()) => Ok(target),
            Err(e) => {
                self.discard(staged).await;
                Err(e)
            }
        }
    }

    /// Remove a staged file, ignoring a file that is already gone
    pub async fn discard(&self, staged: &Path) {
        match fs::remove_file(staged).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %staged.display(), error = %e, "Failed to remove staged upload");
            }
        }
    }

    /// Best-effort removal of a stored file by its public id
    pub async fn remove(&self, public_id: &str) -> bool {
        let Some(path) = self.resolve(public_id) else {
            tracing::warn!(public_id = %public_id, "Refusing to delete suspicious local path");
            return false;
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(public_id = %public_id, "Deleted local asset");
                true
            }
            Err(e) => {
                tracing::warn!(public_id = %public_id, error = %e, "Failed to delete local asset");
                false
            }
        }
    }

    /// Map a public id to a path directly inside the upload directory
    fn resolve(&self, public_id: &str) -> Option<PathBuf> {
        let valid = !public_id.is_empty()
            && !public_id.starts_with('.')
            && !public_id.contains(['/', '\\', '\0'])
            && !public_id.contains("..");

        valid.then(|| self.root.join(public_id))
    }
}
