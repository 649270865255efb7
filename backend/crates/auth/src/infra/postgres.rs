//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use media::StorageProvider;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{Avatar, Profile, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Unique index on `users.email`
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Partial unique index allowing a single admin row
pub const SINGLE_ADMIN_CONSTRAINT: &str = "users_single_admin_idx";

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#"
    user_id,
    name,
    email,
    password_hash,
    role,
    phone,
    location,
    website,
    bio,
    avatar_url,
    avatar_public_id,
    avatar_provider,
    created_at,
    updated_at
"#;

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let avatar = AvatarColumns::from(user.avatar.as_ref());

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                password_hash,
                role,
                phone,
                location,
                website,
                bio,
                avatar_url,
                avatar_public_id,
                avatar_provider,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.role.code())
        .bind(user.profile.phone.as_deref())
        .bind(user.profile.location.as_deref())
        .bind(user.profile.website.as_deref())
        .bind(user.profile.bio.as_deref())
        .bind(avatar.url)
        .bind(avatar.public_id)
        .bind(avatar.provider)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn admin_exists(&self) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE role = 'admin')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn email_taken(&self, email: &Email, except: Option<&UserId>) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1
                  AND ($2::uuid IS NULL OR user_id <> $2)
            )
            "#,
        )
        .bind(email.as_str())
        .bind(except.map(|id| *id.as_uuid()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let avatar = AvatarColumns::from(user.avatar.as_ref());

        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                phone = $5,
                location = $6,
                website = $7,
                bio = $8,
                avatar_url = $9,
                avatar_public_id = $10,
                avatar_provider = $11,
                updated_at = $12
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.profile.phone.as_deref())
        .bind(user.profile.location.as_deref())
        .bind(user.profile.website.as_deref())
        .bind(user.profile.bio.as_deref())
        .bind(avatar.url)
        .bind(avatar.public_id)
        .bind(avatar.provider)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}

/// Translate unique-index violations raised at write time
fn map_write_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(EMAIL_UNIQUE_CONSTRAINT) => return AuthError::EmailInUse,
                Some(SINGLE_ADMIN_CONSTRAINT) => return AuthError::AlreadyInitialized,
                _ => {}
            }
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// Row Types
// ============================================================================

struct AvatarColumns<'a> {
    url: Option<&'a str>,
    public_id: Option<&'a str>,
    provider: Option<&'static str>,
}

impl<'a> From<Option<&'a Avatar>> for AvatarColumns<'a> {
    fn from(avatar: Option<&'a Avatar>) -> Self {
        Self {
            url: avatar.map(|a| a.url.as_str()),
            public_id: avatar.map(|a| a.public_id.as_str()),
            provider: avatar.map(|a| a.provider.code()),
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    phone: Option<String>,
    location: Option<String>,
    website: Option<String>,
    bio: Option<String>,
    avatar_url: Option<String>,
    avatar_public_id: Option<String>,
    avatar_provider: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role: {}", self.role)))?;

        let avatar = match (self.avatar_url, self.avatar_public_id, self.avatar_provider) {
            (Some(url), Some(public_id), Some(provider)) => {
                let provider = StorageProvider::from_code(&provider).ok_or_else(|| {
                    AuthError::Internal(format!("Invalid avatar provider: {provider}"))
                })?;
                Some(Avatar {
                    url,
                    public_id,
                    provider,
                })
            }
            _ => None,
        };

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: DisplayName::from_db(self.name),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password_hash)?,
            role,
            profile: Profile {
                phone: self.phone,
                location: self.location,
                website: self.website,
                bio: self.bio,
            },
            avatar,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
