//! Init Admin Use Case
//!
//! Bootstraps the first administrator. Succeeds exactly once.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::issue_for;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

pub struct InitAdminInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct InitAdminOutput {
    pub token: String,
    pub user: User,
}

impl std::fmt::Debug for InitAdminOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitAdminOutput")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

pub struct InitAdminUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> InitAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: InitAdminInput) -> AuthResult<InitAdminOutput> {
        if self.user_repo.admin_exists().await? {
            return Err(AuthError::AlreadyInitialized);
        }

        if input.name.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(AuthError::validation("Please provide all required fields"));
        }

        let name = DisplayName::new(&input.name)?;
        let email = Email::new(input.email)?;

        if self.user_repo.email_taken(&email, None).await? {
            return Err(AuthError::EmailInUse);
        }

        let password = UserPassword::create(input.password, "password").await?;
        let user = User::new_admin(name, email, password);

        // The single-admin index turns a lost race into AlreadyInitialized
        self.user_repo.create(&user).await?;

        let token = issue_for(&user, &self.config)?;

        tracing::info!(user_id = %user.user_id, "Admin user initialized");

        Ok(InitAdminOutput { token, user })
    }
}
