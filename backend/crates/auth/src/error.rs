//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use media::MediaError;
use platform::password::{PasswordHashError, PasswordPolicyError};
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Same message for both.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Wrong current password on password change
    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    /// No bearer token on the request
    #[error("No token, authorization denied")]
    MissingToken,

    /// Bad signature, malformed or expired token
    #[error("Token is not valid")]
    InvalidToken,

    /// Valid token, insufficient role
    #[error("Access denied. Admin only.")]
    Forbidden,

    /// Bootstrap attempted when an admin already exists
    #[error("Admin user already exists")]
    AlreadyInitialized,

    /// Email collides with another account
    #[error("Email already in use by another account")]
    EmailInUse,

    /// Missing or malformed input
    #[error("{message}")]
    ValidationFailed {
        message: String,
        field: Option<&'static str>,
    },

    /// Token subject no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Upload rejected or failed
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::ValidationFailed {
            message: message.into(),
            field: None,
        }
    }

    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        AuthError::ValidationFailed {
            message: message.into(),
            field: Some(field),
        }
    }

    /// Policy failure for a password being set under `field`
    pub fn password_policy(field: &'static str, err: PasswordPolicyError) -> Self {
        AuthError::invalid_field(field, err.to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::IncorrectCurrentPassword
            | AuthError::AlreadyInitialized
            | AuthError::EmailInUse
            | AuthError::ValidationFailed { .. } => ErrorKind::BadRequest,
            AuthError::MissingToken | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Media(e) => e.kind(),
            AuthError::Database(e) => match e {
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                    ErrorKind::ServiceUnavailable
                }
                _ => ErrorKind::InternalServerError,
            },
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Media(e) => e.to_app_error(),
            AuthError::Database(_) => AppError::new(self.kind(), "Database error"),
            AuthError::Internal(_) => AppError::new(self.kind(), "Server error"),
            AuthError::EmailInUse => {
                AppError::new(self.kind(), self.to_string()).with_field("email")
            }
            AuthError::IncorrectCurrentPassword => {
                AppError::new(self.kind(), self.to_string()).with_field("currentPassword")
            }
            AuthError::ValidationFailed {
                field: Some(field), ..
            } => AppError::new(self.kind(), self.to_string()).with_field(*field),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Media(e) => e.log(),
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::IncorrectCurrentPassword => {
                tracing::warn!("Password change with wrong current password");
            }
            AuthError::Forbidden => {
                tracing::warn!("Non-admin token rejected by role gate");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::SigningFailed(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
