//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State, multipart::MultipartRejection};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

use media::presentation::multipart::multipart_rejection;
use media::{UploadPipeline, UploadPolicy, read_form};

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CurrentUserUseCase, InitAdminInput,
    InitAdminUseCase, SignInInput, SignInUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, ChangePasswordRequest, InitAdminRequest, LoginRequest, MessageResponse,
    UserResponse,
};
use crate::presentation::middleware::AuthUser;

/// Multipart fields an avatar may arrive under
pub const AVATAR_FIELDS: [&str; 2] = ["avatarImage", "profilePic"];

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub pipeline: Arc<UploadPipeline>,
}

// ============================================================================
// Init Admin
// ============================================================================

/// POST /auth/init-admin
pub async fn init_admin<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<InitAdminRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(json_rejection)?;

    let use_case = InitAdminUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(InitAdminInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: output.token,
            user: UserResponse::from(&output.user),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(json_rejection)?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        token: output.token,
        user: UserResponse::from(&output.user),
    }))
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /auth/user
pub async fn current_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(caller): Extension<AuthUser>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = CurrentUserUseCase::new(state.repo.clone());

    let user = use_case.execute(&caller.id).await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// PUT /profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(caller): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let multipart = multipart.map_err(multipart_rejection)?;
    let mut form = read_form(multipart, &AVATAR_FIELDS, &UploadPolicy::profile_image()).await?;

    let input = UpdateProfileInput {
        name: form.take_text("name"),
        email: form.take_text("email"),
        phone: form.take_text("phone"),
        location: form.take_text("location"),
        website: form.take_text("website"),
        bio: form.take_text("bio"),
        avatar: form.file.take(),
    };

    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.pipeline.clone());

    let user = use_case.execute(&caller.id, input).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /profile/password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    Extension(caller): Extension<AuthUser>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(json_rejection)?;

    let use_case = ChangePasswordUseCase::new(state.repo.clone());

    use_case
        .execute(
            &caller.id,
            ChangePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn json_rejection(rejection: JsonRejection) -> AuthError {
    AuthError::validation(format!("Invalid request body: {}", rejection.body_text()))
}
