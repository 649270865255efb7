//! Application Error - Unified error type for the application
//!
//! Defines the [`AppError`] struct.
//! Every crate converts its own error enum into this type before it
//! reaches the HTTP boundary, so clients always see the same body shape.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `message` - ユーザー向けのエラーメッセージ
/// * `field` - 問題のある入力フィールド名（オプション）
/// * `action` - ユーザーが取るべきアクション（オプション）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::BadRequest, "Email already in use by another account")
///     .with_field("email");
/// assert_eq!(err.field(), Some("email"));
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    field: Option<Cow<'static, str>>,
    action: Option<Cow<'static, str>>,
}

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
            action: None,
        }
    }

    /// 404 Not Found
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// 問題のある入力フィールドを設定（フロントエンドでのハイライト用）
    #[inline]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// ユーザー向けアクションを設定
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// JSON レスポンスボディ
    ///
    /// `{"msg", "error", "status", "field"?, "action"?}` の形で返す。
    pub fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "msg": self.message(),
            "error": self.kind.as_str(),
            "status": self.status_code(),
        });

        if let Some(map) = body.as_object_mut() {
            if let Some(field) = self.field() {
                map.insert("field".to_string(), field.into());
            }
            if let Some(action) = self.action() {
                map.insert("action".to_string(), action.into());
            }
        }

        body
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(field) = &self.field {
            builder.field("field", field);
        }
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl Error for AppError {}
