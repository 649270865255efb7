use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. `admin` is the only elevated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Parse a role code
    ///
    /// Codes come from tokens and rows, so an unknown code is `None`
    /// rather than a panic.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Role carried by a verified token
    ///
    /// Any code other than `admin` grants no elevation.
    #[inline]
    pub fn from_claim(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("user"), Some(UserRole::User));
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("Admin"), None);
        assert_eq!(UserRole::from_code("super_admin"), None);
    }

    #[test]
    fn test_unknown_claim_is_not_elevated() {
        assert_eq!(UserRole::from_claim("admin"), UserRole::Admin);
        assert_eq!(UserRole::from_claim("editor"), UserRole::User);
        assert_eq!(UserRole::from_claim("ADMIN"), UserRole::User);
        assert_eq!(UserRole::from_claim(""), UserRole::User);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::User.to_string(), "user");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_default_is_not_elevated() {
        assert!(!UserRole::default().is_admin());
        assert!(UserRole::Admin.is_admin());
    }
}
