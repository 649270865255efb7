//! Multipart Form Reading
//!
//! Files are read chunk by chunk and abandoned as soon as they exceed the
//! policy ceiling, so an oversized upload is never buffered whole.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;

use crate::domain::asset::IncomingFile;
use crate::domain::policy::UploadPolicy;
use crate::error::{MediaError, MediaResult};

/// Text fields plus at most one file
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<IncomingFile>,
}

impl MultipartForm {
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }
}

/// Read a multipart body
///
/// `file_fields` lists the field names a file may arrive under. A file part
/// with an empty name and no bytes (a form submitted without choosing a file)
/// counts as no file.
pub async fn read_form(
    mut multipart: Multipart,
    file_fields: &[&str],
    policy: &UploadPolicy,
) -> MediaResult<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        let Some(original_name) = field.file_name().map(str::to_string) else {
            let value = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, value);
            continue;
        };

        if !file_fields.contains(&name.as_str()) {
            return Err(MediaError::Validation(format!("Unexpected file field: {name}")));
        }

        let content_type = field.content_type().map(str::to_string);

        if original_name.is_empty() {
            // Browsers send an empty part when no file was chosen
            let leftover = field.chunk().await.map_err(multipart_error)?;
            if leftover.is_none_or(|chunk| chunk.is_empty()) {
                continue;
            }
            return Err(MediaError::Validation("File name is missing".to_string()));
        }

        if form.file.is_some() {
            return Err(MediaError::Validation("Only one file may be uploaded".to_string()));
        }

        policy.check_declared(&original_name, content_type.as_deref())?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            policy.check_size(bytes.len() + chunk.len())?;
            bytes.extend_from_slice(&chunk);
        }

        tracing::debug!(
            field = %name,
            original_name = %original_name,
            size = bytes.len(),
            "Received upload"
        );

        form.file = Some(IncomingFile {
            field_name: name,
            original_name,
            content_type,
            bytes,
        });
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> MediaError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        MediaError::Rejected("Request body too large".to_string())
    } else {
        MediaError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// Map an extractor rejection (wrong content type, missing boundary)
pub fn multipart_rejection(rejection: MultipartRejection) -> MediaError {
    MediaError::Validation(format!("Invalid multipart body: {}", rejection.body_text()))
}
