//! Sign In Use Case
//!
//! Exchanges email and password for a bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::issue_for;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub token: String,
    pub user: User,
}

impl std::fmt::Debug for SignInOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInOutput")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::validation("Please provide email and password"));
        }

        // A malformed email cannot belong to anyone
        let Ok(email) = Email::new(input.email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            // Unknown emails pay for one verification too
            UserPassword::placeholder()
                .await?
                .matches(input.password)
                .await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password.matches(input.password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = issue_for(&user, &self.config)?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User signed in");

        Ok(SignInOutput { token, user })
    }
}
