//! Change Password Use Case

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: ChangePasswordInput) -> AuthResult<()> {
        if input.current_password.is_empty() || input.new_password.is_empty() {
            return Err(AuthError::validation(
                "Please provide current and new password",
            ));
        }

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.password.matches(input.current_password).await? {
            return Err(AuthError::IncorrectCurrentPassword);
        }

        let password = UserPassword::create(input.new_password, "newPassword").await?;
        user.set_password(password);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(())
    }
}
