//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use media::StorageProvider;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::{Avatar, User};

// ============================================================================
// Init Admin
// ============================================================================

/// Bootstrap request. Missing fields deserialize as empty and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InitAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the authenticated identity
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ============================================================================
// Password
// ============================================================================

/// Change password request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Plain confirmation
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

// ============================================================================
// User
// ============================================================================

/// Identity as returned to clients. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<AvatarResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    pub url: String,
    pub public_id: String,
    pub provider: StorageProvider,
}

impl From<&Avatar> for AvatarResponse {
    fn from(avatar: &Avatar) -> Self {
        Self {
            url: avatar.url.clone(),
            public_id: avatar.public_id.clone(),
            provider: avatar.provider,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.code().to_string(),
            phone: user.profile.phone.clone(),
            location: user.profile.location.clone(),
            website: user.profile.website.clone(),
            bio: user.profile.bio.clone(),
            avatar: user.avatar.as_ref().map(AvatarResponse::from),
            created_at: user.created_at,
        }
    }
}
