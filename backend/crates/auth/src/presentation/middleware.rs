//! Auth Middleware
//!
//! Auth Gate and Role Gate for protected routes. Both are stateless: the
//! token alone decides, no store lookup happens here.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use platform::bearer::extract_bearer_token;
use platform::token;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct GateState {
    pub config: Arc<AuthConfig>,
}

impl GateState {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }
}

/// Verified caller, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub role: UserRole,
}

/// Resolve the caller from the `Authorization` header
pub fn authenticate(req: &Request<Body>, config: &AuthConfig) -> AuthResult<AuthUser> {
    let raw = extract_bearer_token(req.headers()).ok_or(AuthError::MissingToken)?;

    let claims = token::verify(&raw, &config.token_secret)?;

    // A signed token with a malformed subject id is still not valid
    let id = claims
        .user
        .id
        .parse::<UserId>()
        .map_err(|_| AuthError::InvalidToken)?;
    let role = UserRole::from_claim(&claims.user.role);

    Ok(AuthUser { id, role })
}

/// Middleware that requires a valid bearer token
pub async fn require_auth(
    State(state): State<GateState>,
    mut req: Request<Body>,
    next: Next,
) -> AuthResult<Response> {
    let user = authenticate(&req, &state.config)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware that requires a valid bearer token carrying the admin role
pub async fn require_admin(
    State(state): State<GateState>,
    mut req: Request<Body>,
    next: Next,
) -> AuthResult<Response> {
    let user = authenticate(&req, &state.config)?;

    if !user.role.is_admin() {
        if !state.config.permissive_role_check {
            return Err(AuthError::Forbidden);
        }
        tracing::warn!(
            user_id = %user.id,
            role = %user.role,
            path = %req.uri().path(),
            "Role check bypassed by permissive mode"
        );
    }

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
