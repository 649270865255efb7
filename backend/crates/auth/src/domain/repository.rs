//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// Credential store
///
/// `create` and `update` must translate unique-index violations into
/// `AuthError::EmailInUse` (email) and `AuthError::AlreadyInitialized`
/// (second admin), so callers can rely on the store even when a pre-check
/// raced with another request.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Whether any admin exists
    async fn admin_exists(&self) -> AuthResult<bool>;

    /// Whether an account other than `except` owns the email
    async fn email_taken(&self, email: &Email, except: Option<&UserId>) -> AuthResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;
}
