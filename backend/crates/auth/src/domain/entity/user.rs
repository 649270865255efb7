//! User Entity
//!
//! One account able to authenticate. The password is only ever held as a hash.

use chrono::{DateTime, Utc};
use media::{StorageProvider, StoredAsset};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
    user_role::UserRole,
};

/// Optional profile fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
}

/// Reference to the stored avatar image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub url: String,
    pub public_id: String,
    pub provider: StorageProvider,
}

impl From<&StoredAsset> for Avatar {
    fn from(asset: &StoredAsset) -> Self {
        Self {
            url: asset.url.clone(),
            public_id: asset.public_id.clone(),
            provider: asset.provider,
        }
    }
}

/// Requested profile changes
///
/// `None` leaves a field untouched. For optional fields `Some("")` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<DisplayName>,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
}

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: DisplayName,
    /// Unique login handle
    pub email: Email,
    pub password: UserPassword,
    pub role: UserRole,
    pub profile: Profile,
    pub avatar: Option<Avatar>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(name: DisplayName, email: Email, password: UserPassword, role: UserRole) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password,
            role,
            profile: Profile::default(),
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create the first administrator
    pub fn new_admin(name: DisplayName, email: Email, password: UserPassword) -> Self {
        Self::new(name, email, password, UserRole::Admin)
    }

    /// Apply profile changes
    pub fn apply_changes(&mut self, changes: ProfileChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }

        apply_optional(&mut self.profile.phone, changes.phone);
        apply_optional(&mut self.profile.location, changes.location);
        apply_optional(&mut self.profile.website, changes.website);
        apply_optional(&mut self.profile.bio, changes.bio);

        self.updated_at = Utc::now();
    }

    /// Replace the avatar, returning the superseded one
    pub fn replace_avatar(&mut self, avatar: Avatar) -> Option<Avatar> {
        self.updated_at = Utc::now();
        self.avatar.replace(avatar)
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

fn apply_optional(slot: &mut Option<String>, change: Option<String>) {
    if let Some(value) = change {
        let value = value.trim();
        *slot = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
    }
}
