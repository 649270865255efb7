//! Server Configuration
//!
//! Read once from the environment at startup. Everything downstream gets
//! typed config structs, never raw variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::{AuthConfig, ProvisionConfig};
use media::{MediaConfig, RemoteCredentials};
use platform::token::TokenSecret;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_NAME: &str = "Admin User";

/// Not `Debug`: the database URL may embed credentials
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub media: MediaConfig,
    /// Set when the development admin should be ensured at startup
    pub provision: Option<ProvisionConfig>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let token_secret = match var("JWT_SECRET") {
            Some(secret) => TokenSecret::new(secret),
            None => {
                let allow_insecure = flag(var("ALLOW_INSECURE_JWT_SECRET"), cfg!(debug_assertions))?;
                if !allow_insecure {
                    bail!("JWT_SECRET must be set (or ALLOW_INSECURE_JWT_SECRET=true for local use)");
                }
                tracing::warn!("JWT_SECRET is not set, signing tokens with the insecure fallback secret");
                TokenSecret::insecure_fallback()
            }
        };

        let permissive = flag(var("PERMISSIVE_ROLE_CHECK"), false)?;
        if permissive {
            tracing::warn!("PERMISSIVE_ROLE_CHECK is on, admin routes accept any valid token");
        }
        let auth = AuthConfig::new(token_secret).with_permissive_role_check(permissive);

        let timeout_secs = match var("MEDIA_UPLOAD_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("MEDIA_UPLOAD_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_UPLOAD_TIMEOUT_SECS,
        };

        let uploads_dir = var("UPLOADS_DIR").map_or_else(|| PathBuf::from("uploads"), PathBuf::from);
        let mut media =
            MediaConfig::local(uploads_dir).with_remote_timeout(Duration::from_secs(timeout_secs));
        if let Some(remote) = RemoteCredentials::from_parts(
            var("CLOUDINARY_CLOUD_NAME"),
            var("CLOUDINARY_API_KEY"),
            var("CLOUDINARY_API_SECRET"),
        ) {
            media = media.with_remote(remote);
        }

        let provision = if flag(var("DEV_PROVISION_ADMIN"), false)? {
            match var("ADMIN_PASSWORD") {
                Some(password) => Some(ProvisionConfig {
                    name: var("ADMIN_NAME").unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string()),
                    email: var("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
                    password,
                }),
                None => {
                    tracing::warn!("DEV_PROVISION_ADMIN is set but ADMIN_PASSWORD is not, skipping");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            database_url,
            port,
            frontend_origins,
            auth,
            media,
            provision,
        })
    }
}

fn flag(value: Option<String>, default: bool) -> anyhow::Result<bool> {
    match value.as_deref().map(str::trim) {
        None => Ok(default),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => bail!("expected true or false, got {v}"),
    }
}
