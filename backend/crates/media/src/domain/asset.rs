//! Media Asset Types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the bytes of an asset live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    Local,
    Remote,
}

impl StorageProvider {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            StorageProvider::Local => "local",
            StorageProvider::Remote => "remote",
        }
    }

    /// Parse a stored provider code
    ///
    /// Returns `None` for unknown codes instead of panicking, since the value
    /// can come from a request body.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "local" => Some(StorageProvider::Local),
            "remote" => Some(StorageProvider::Remote),
            _ => None,
        }
    }
}

impl fmt::Display for StorageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StorageProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Unknown storage provider: {s}"))
    }
}

/// A file received from a client, fully read and within its ceiling
#[derive(Clone)]
pub struct IncomingFile {
    /// Multipart field the file arrived under (`avatarImage`, `image`, ...)
    pub field_name: String,
    /// Client-supplied file name, untrusted
    pub original_name: String,
    /// Declared content type, untrusted
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for IncomingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncomingFile")
            .field("field_name", &self.field_name)
            .field("original_name", &self.original_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// A durable, URL-addressable asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAsset {
    pub url: String,
    pub public_id: String,
    pub provider: StorageProvider,
    pub original_name: String,
    pub size: usize,
    pub content_type: String,
}
