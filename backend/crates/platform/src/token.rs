//! Bearer Token Issuing and Verification
//!
//! HS256 JSON Web Tokens carrying `{ "user": { "id", "role" } }`.
//! Tokens are stateless: expiry is the only way they stop working.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Token lifetime for every token issued by this service
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Secret used when none is configured and insecure fallback is allowed
pub const FALLBACK_SECRET: &str = "defaultsecret";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed, expired. Callers cannot tell which.
    #[error("Token is not valid")]
    Invalid,

    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

// ============================================================================
// Claims
// ============================================================================

/// Identity asserted by a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSubject {
    pub id: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user: TokenSubject,
    pub iat: i64,
    pub exp: i64,
}

// ============================================================================
// Signing Key
// ============================================================================

/// Server-held signing secret
///
/// Debug output is redacted.
#[derive(Clone)]
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// The well-known fallback secret. Only for local development.
    pub fn insecure_fallback() -> Self {
        Self::new(FALLBACK_SECRET)
    }

    pub fn is_fallback(&self) -> bool {
        self.0.as_slice() == FALLBACK_SECRET.as_bytes()
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenSecret").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Issue / Verify
// ============================================================================

/// Issue a token valid for `ttl` starting now
pub fn issue(
    subject: TokenSubject,
    secret: &TokenSecret,
    ttl: Duration,
) -> Result<String, TokenError> {
    issue_at(subject, secret, ttl, Utc::now())
}

/// Issue a token as if the current time were `now`
pub fn issue_at(
    subject: TokenSubject,
    secret: &TokenSecret,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = TokenClaims {
        user: subject,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&secret.0),
    )
    .map_err(|e| TokenError::SigningFailed(e.to_string()))
}

/// Verify signature and expiry, returning the claims
pub fn verify(token: &str, secret: &TokenSecret) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&secret.0), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(reason = %e, "Token rejected");
            TokenError::Invalid
        })
}
