//! Media Configuration
//!
//! Decided once at startup and injected into the pipeline. Nothing in this
//! crate reads the environment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Cloudinary API endpoint
pub const DEFAULT_REMOTE_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Media pipeline configuration
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Persistent local directory, served at `public_prefix`
    pub uploads_dir: PathBuf,
    /// URL prefix for locally stored files
    pub public_prefix: String,
    /// Remote host credentials. `None` forces local storage.
    pub remote: Option<RemoteCredentials>,
    /// Timeout for every remote call
    pub remote_timeout: Duration,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from("uploads"),
            public_prefix: "/uploads".to_string(),
            remote: None,
            remote_timeout: Duration::from_secs(30),
        }
    }
}

impl MediaConfig {
    /// Local-only configuration rooted at `uploads_dir`
    pub fn local(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_remote(mut self, remote: RemoteCredentials) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    /// Directory for bytes that are not yet committed anywhere
    ///
    /// A hidden sibling of `uploads_dir`: outside the served tree, on the
    /// same filesystem so promotion stays a rename.
    pub fn staging_dir(&self) -> PathBuf {
        let name = self
            .uploads_dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("uploads");
        let parent = self.uploads_dir.parent().unwrap_or_else(|| Path::new(""));
        parent.join(format!(".{name}-staging"))
    }
}

/// Remote media host (Cloudinary) credentials
#[derive(Clone)]
pub struct RemoteCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// API endpoint, overridable for tests
    pub api_base: String,
    /// Folder every upload is placed in
    pub folder: String,
    /// Incoming transformation applied on upload
    pub transformation: String,
}

impl RemoteCredentials {
    /// Build credentials only when all three values are present and non-empty
    pub fn from_parts(
        cloud_name: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Option<Self> {
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        Some(Self {
            cloud_name: non_empty(cloud_name)?,
            api_key: non_empty(api_key)?,
            api_secret: non_empty(api_secret)?,
            api_base: DEFAULT_REMOTE_API_BASE.to_string(),
            folder: "portfolio".to_string(),
            transformation: "c_limit,w_1200".to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for RemoteCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("folder", &self.folder)
            .finish()
    }
}
