//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup.

use chrono::Duration;
use platform::token::{TOKEN_TTL_HOURS, TokenSecret};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token signing secret
    pub token_secret: TokenSecret,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Role gate accepts any valid token when set
    pub permissive_role_check: bool,
}

impl AuthConfig {
    pub fn new(token_secret: TokenSecret) -> Self {
        Self {
            token_secret,
            token_ttl: Duration::hours(TOKEN_TTL_HOURS),
            permissive_role_check: false,
        }
    }

    pub fn with_permissive_role_check(mut self, enabled: bool) -> Self {
        self.permissive_role_check = enabled;
        self
    }
}

/// Identity used by the development admin provisioning routine
#[derive(Clone)]
pub struct ProvisionConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for ProvisionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisionConfig")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new(TokenSecret::new("s3cret"));
        assert_eq!(config.token_ttl, Duration::hours(24));
        assert!(!config.permissive_role_check);
    }

    #[test]
    fn test_provision_config_redacts_password() {
        let config = ProvisionConfig {
            name: "Admin User".into(),
            email: "admin@example.com".into(),
            password: "hunter2hunter2".into(),
        };
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
