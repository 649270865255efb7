//! Update Profile Use Case
//!
//! Edits the caller's own profile, optionally replacing the avatar.
//!
//! Ordering matters for asset lifecycle:
//! 1. validate input and email uniqueness (nothing stored yet)
//! 2. store the new avatar
//! 3. update the record; on failure the new avatar is deleted
//! 4. delete the superseded avatar, best-effort

use std::sync::Arc;

use media::{IncomingFile, UploadPipeline, UploadPolicy};

use crate::domain::entity::user::{Avatar, ProfileChanges, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{display_name::DisplayName, email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Raw profile input. `None` means the field was not sent.
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<IncomingFile>,
}

pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    pipeline: Arc<UploadPipeline>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, pipeline: Arc<UploadPipeline>) -> Self {
        Self {
            user_repo,
            pipeline,
        }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AuthResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let name = non_empty(input.name).map(DisplayName::new).transpose()?;
        let email = non_empty(input.email).map(Email::new).transpose()?;

        // Re-submitting one's own email is a no-op
        let email = email.filter(|e| *e != user.email);
        if let Some(email) = &email {
            if self.user_repo.email_taken(email, Some(user_id)).await? {
                return Err(AuthError::EmailInUse);
            }
        }

        let new_avatar = match input.avatar {
            Some(file) => Some(
                self.pipeline
                    .store(file, &UploadPolicy::profile_image())
                    .await?,
            ),
            None => None,
        };

        user.apply_changes(ProfileChanges {
            name,
            email,
            phone: input.phone,
            location: input.location,
            website: input.website,
            bio: input.bio,
        });

        let superseded = new_avatar
            .as_ref()
            .and_then(|asset| user.replace_avatar(Avatar::from(asset)));

        if let Err(e) = self.user_repo.update(&user).await {
            if let Some(asset) = &new_avatar {
                self.pipeline.delete(&asset.public_id, asset.provider).await;
            }
            return Err(e);
        }

        if let Some(old) = superseded {
            if !self.pipeline.delete(&old.public_id, old.provider).await {
                tracing::warn!(public_id = %old.public_id, "Superseded avatar was not deleted");
            }
        }

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(user)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
