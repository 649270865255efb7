//! Upload Policies
//!
//! Which files a call site accepts and how large they may be.
//! Every check here runs before anything touches the disk.

use crate::error::{MediaError, MediaResult};

const MB: usize = 1024 * 1024;

/// Extensions accepted by [`ImageRule::Extension`]
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// How a file proves it is an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRule {
    /// Declared content type must be `image/*`
    ContentType,
    /// Original file name must end in an allow-listed extension
    Extension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub rule: ImageRule,
}

impl UploadPolicy {
    pub const fn new(max_bytes: usize, rule: ImageRule) -> Self {
        Self { max_bytes, rule }
    }

    /// Profile pictures (5 MB, content type)
    pub const fn profile_image() -> Self {
        Self::new(5 * MB, ImageRule::ContentType)
    }

    /// Skill, project and achievement images (5 MB, content type)
    pub const fn content_image() -> Self {
        Self::new(5 * MB, ImageRule::ContentType)
    }

    /// Blog cover images (10 MB, content type)
    pub const fn blog_cover() -> Self {
        Self::new(10 * MB, ImageRule::ContentType)
    }

    /// Avatar uploads checked by file extension (5 MB)
    pub const fn legacy_avatar() -> Self {
        Self::new(5 * MB, ImageRule::Extension)
    }

    /// Check name and declared type
    ///
    /// Runs as soon as the multipart headers are known, before the body is read.
    pub fn check_declared(&self, original_name: &str, content_type: Option<&str>) -> MediaResult<()> {
        match self.rule {
            ImageRule::ContentType => {
                let declared = content_type
                    .map(str::to_string)
                    .or_else(|| {
                        mime_guess::from_path(original_name)
                            .first()
                            .map(|m| m.essence_str().to_string())
                    })
                    .unwrap_or_default();

                if declared.to_ascii_lowercase().starts_with("image/") {
                    Ok(())
                } else {
                    Err(MediaError::Rejected(
                        "Not an image! Please upload an image.".to_string(),
                    ))
                }
            }
            ImageRule::Extension => match extension_of(original_name) {
                Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
                _ => Err(MediaError::Rejected(
                    "Only image files are allowed!".to_string(),
                )),
            },
        }
    }

    /// Check a byte count against the ceiling
    pub fn check_size(&self, size: usize) -> MediaResult<()> {
        if size > self.max_bytes {
            return Err(MediaError::Rejected(format!(
                "File too large. Maximum size is {}",
                human_size(self.max_bytes)
            )));
        }
        Ok(())
    }

    pub fn check(&self, original_name: &str, content_type: Option<&str>, size: usize) -> MediaResult<()> {
        self.check_declared(original_name, content_type)?;
        self.check_size(size)
    }
}

/// Lowercased extension of a file name, if any
pub fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn human_size(bytes: usize) -> String {
    if bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else {
        format!("{bytes} bytes")
    }
}
