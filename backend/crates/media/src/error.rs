//! Media Error Types
//!
//! Upload and storage errors, converted into the unified
//! `kernel::error::AppError` at the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Media-specific result type alias
pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    /// Wrong file type or over the size ceiling. Nothing was written.
    #[error("{0}")]
    Rejected(String),

    /// Malformed multipart body or missing field
    #[error("{0}")]
    Validation(String),

    /// Storage failed after validation passed
    #[error("Error uploading file")]
    UploadFailed { cause: String },

    /// Pipeline could not be constructed
    #[error("Media configuration error: {0}")]
    Config(String),
}

impl MediaError {
    pub fn upload_failed(cause: impl Into<String>) -> Self {
        MediaError::UploadFailed {
            cause: cause.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            MediaError::Rejected(_) | MediaError::Validation(_) => StatusCode::BAD_REQUEST,
            MediaError::UploadFailed { .. } | MediaError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MediaError::Rejected(_) | MediaError::Validation(_) => ErrorKind::BadRequest,
            MediaError::UploadFailed { .. } | MediaError::Config(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            MediaError::Rejected(_) => err.with_action("Choose a JPG, PNG or GIF image within the size limit"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            MediaError::UploadFailed { cause } => {
                tracing::error!(cause = %cause, "Media upload failed");
            }
            MediaError::Config(msg) => {
                tracing::error!(message = %msg, "Media configuration error");
            }
            MediaError::Rejected(reason) => {
                tracing::info!(reason = %reason, "Upload rejected");
            }
            MediaError::Validation(_) => {
                tracing::debug!(error = %self, "Media request invalid");
            }
        }
    }
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        err.to_app_error()
    }
}
