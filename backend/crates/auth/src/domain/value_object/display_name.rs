//! Display Name Value Object
//!
//! The human-readable name shown on the portfolio. Unlike the email it is
//! not unique and carries no login meaning.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Maximum length for a display name (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    /// NFKC-normalize, trim and validate
    pub fn new(raw: impl AsRef<str>) -> AuthResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(AuthError::invalid_field("name", "Name cannot be empty"));
        }

        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AuthError::invalid_field(
                "name",
                format!("Name must be at most {} characters", DISPLAY_NAME_MAX_LENGTH),
            ));
        }

        if name.chars().any(char::is_control) {
            return Err(AuthError::invalid_field(
                "name",
                "Name contains invalid characters",
            ));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_trims() {
        assert_eq!(DisplayName::new("  Ada Lovelace ").unwrap().as_str(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_nfkc() {
        // Full-width letters fold to ASCII
        assert_eq!(DisplayName::new("Ａｄａ").unwrap().as_str(), "Ada");
    }

    #[test]
    fn test_display_name_invalid() {
        assert!(DisplayName::new("").is_err());
        assert!(DisplayName::new("   ").is_err());
        assert!(DisplayName::new("a\u{0007}b").is_err());
        assert!(DisplayName::new("x".repeat(101)).is_err());
        assert!(DisplayName::new("x".repeat(100)).is_ok());
    }
}
