//! Development Admin Provisioning
//!
//! Makes sure a local environment has an administrator to log in with.

use std::sync::Arc;

use crate::application::config::ProvisionConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
};
use crate::error::AuthResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created(UserId),
    /// An admin already exists; nothing was changed
    AlreadyPresent,
}

pub struct ProvisionAdminUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ProvisionAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, config: &ProvisionConfig) -> AuthResult<ProvisionOutcome> {
        if self.user_repo.admin_exists().await? {
            tracing::info!("Admin user already exists, skipping provisioning");
            return Ok(ProvisionOutcome::AlreadyPresent);
        }

        let name = DisplayName::new(&config.name)?;
        let email = Email::new(config.email.clone())?;
        let password = UserPassword::create(config.password.clone(), "password").await?;

        let user = User::new_admin(name, email, password);
        self.user_repo.create(&user).await?;

        tracing::info!(email = %user.email, "Development admin user created");

        Ok(ProvisionOutcome::Created(user.user_id))
    }
}
