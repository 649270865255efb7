//! User Password Value Object
//!
//! Stored password hash. Delegates to `platform::password` for the
//! cryptography and runs it on the blocking pool.
//!
//! ## Usage
//! ```rust,no_run
//! # async fn demo() -> auth::AuthResult<()> {
//! use auth::domain::value_object::user_password::UserPassword;
//!
//! let stored = UserPassword::create("secret123".to_string(), "password").await?;
//! assert!(stored.matches("secret123".to_string()).await?);
//! # Ok(())
//! # }
//! ```

use platform::crypto::random_token;
use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;
use tokio::sync::OnceCell;

use crate::error::{AuthError, AuthResult};

/// Password hash as stored on the user record
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

/// Hash of a random secret, verified against when no account matches
static PLACEHOLDER: OnceCell<UserPassword> = OnceCell::const_new();

impl UserPassword {
    /// Apply the password policy to a new password and hash it
    ///
    /// `field` names the request field in policy errors.
    pub async fn create(raw: String, field: &'static str) -> AuthResult<Self> {
        let clear = ClearTextPassword::new(raw).map_err(|e| AuthError::password_policy(field, e))?;
        let hashed = clear.hash_blocking().await?;
        Ok(Self(hashed))
    }

    /// Check a candidate typed in by the user. No policy is applied.
    pub async fn matches(&self, candidate: String) -> AuthResult<bool> {
        let candidate = ClearTextPassword::candidate(candidate);
        Ok(self.0.verify_blocking(candidate).await?)
    }

    /// Hash with the same parameters as real ones that no known password
    /// matches. Built on first use.
    pub async fn placeholder() -> AuthResult<&'static Self> {
        PLACEHOLDER
            .get_or_try_init(|| Self::create(random_token(24), "password"))
            .await
    }

    /// Create from database value
    pub fn from_db(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AuthError::Internal(format!("Stored password hash: {e}")))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}
