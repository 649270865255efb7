//! Token issuing for authenticated users

use platform::token::{self, TokenSubject};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::error::AuthResult;

/// Issue a bearer token asserting the user's id and role
pub fn issue_for(user: &User, config: &AuthConfig) -> AuthResult<String> {
    let subject = TokenSubject {
        id: user.user_id.to_string(),
        role: user.role.code().to_string(),
    };

    Ok(token::issue(subject, &config.token_secret, config.token_ttl)?)
}
