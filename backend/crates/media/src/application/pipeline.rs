//! Upload Pipeline
//!
//! Validate, stage, then commit to the remote host or the local directory.
//! A staged file never outlives a `store` call.

use std::sync::Arc;

use crate::application::config::MediaConfig;
use crate::domain::asset::{IncomingFile, StorageProvider, StoredAsset};
use crate::domain::file_name;
use crate::domain::policy::UploadPolicy;
use crate::error::{MediaError, MediaResult};
use crate::infra::{CloudinaryClient, LocalDisk};

/// Upload pipeline shared by every handler that accepts files
#[derive(Debug, Clone)]
pub struct UploadPipeline {
    config: Arc<MediaConfig>,
    disk: LocalDisk,
    remote: Option<CloudinaryClient>,
}

impl UploadPipeline {
    pub fn new(config: MediaConfig) -> MediaResult<Self> {
        let remote = config
            .remote
            .clone()
            .map(|credentials| CloudinaryClient::new(credentials, config.remote_timeout))
            .transpose()?;

        let disk = LocalDisk::new(config.uploads_dir.clone(), config.staging_dir());

        Ok(Self {
            config: Arc::new(config),
            disk,
            remote,
        })
    }

    /// Provider new uploads go to
    pub fn provider(&self) -> StorageProvider {
        if self.remote.is_some() {
            StorageProvider::Remote
        } else {
            StorageProvider::Local
        }
    }

    /// Validate and persist a file
    pub async fn store(&self, file: IncomingFile, policy: &UploadPolicy) -> MediaResult<StoredAsset> {
        policy.check(&file.original_name, file.content_type.as_deref(), file.size())?;

        if file.bytes.is_empty() {
            return Err(MediaError::Rejected("Uploaded file is empty".to_string()));
        }

        let name = file_name::generate(
            &file.field_name,
            &file.original_name,
            file.content_type.as_deref(),
        );
        let content_type = file
            .content_type
            .clone()
            .or_else(|| {
                mime_guess::from_path(&name)
                    .first()
                    .map(|m| m.essence_str().to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let original_name = file_name::sanitize_original(&file.original_name);
        let size = file.size();

        let staged = self
            .disk
            .stage(&file.bytes)
            .await
            .map_err(|e| MediaError::upload_failed(format!("stage upload: {e}")))?;

        let (url, public_id, provider) = match &self.remote {
            Some(client) => {
                let result = client.upload(&staged, &name, &content_type).await;
                self.disk.discard(&staged).await;
                let uploaded = result?;
                (uploaded.secure_url, uploaded.public_id, StorageProvider::Remote)
            }
            None => {
                self.disk
                    .promote(&staged, &name)
                    .await
                    .map_err(|e| MediaError::upload_failed(format!("move upload: {e}")))?;
                let url = format!("{}/{}", self.config.public_prefix.trim_end_matches('/'), name);
                (url, name, StorageProvider::Local)
            }
        };

        tracing::info!(
            public_id = %public_id,
            provider = %provider,
            size,
            "Stored media asset"
        );

        Ok(StoredAsset {
            url,
            public_id,
            provider,
            original_name,
            size,
            content_type,
        })
    }

    /// Best-effort delete. Failures are logged, never raised.
    pub async fn delete(&self, public_id: &str, provider: StorageProvider) -> bool {
        match provider {
            StorageProvider::Local => self.disk.remove(public_id).await,
            StorageProvider::Remote => match &self.remote {
                Some(client) => client.destroy(public_id).await,
                None => {
                    tracing::warn!(
                        public_id = %public_id,
                        "Cannot delete remote asset: remote host not configured"
                    );
                    false
                }
            },
        }
    }
}
