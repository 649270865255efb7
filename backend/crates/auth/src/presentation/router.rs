//! Auth Router

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use media::{MAX_MULTIPART_BODY, UploadPipeline};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{GateState, require_auth};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgUserRepository,
    config: Arc<AuthConfig>,
    pipeline: Arc<UploadPipeline>,
) -> Router {
    auth_router_generic(repo, config, pipeline)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(
    repo: R,
    config: Arc<AuthConfig>,
    pipeline: Arc<UploadPipeline>,
) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let gate = GateState::new(config.clone());
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
        pipeline,
    };

    let public = Router::new()
        .route("/auth/init-admin", post(handlers::init_admin::<R>))
        .route("/auth/login", post(handlers::login::<R>));

    let protected = Router::new()
        .route("/auth/user", get(handlers::current_user::<R>))
        .route(
            "/profile",
            put(handlers::update_profile::<R>).layer(DefaultBodyLimit::max(MAX_MULTIPART_BODY)),
        )
        .route("/profile/password", put(handlers::change_password::<R>))
        .route_layer(from_fn_with_state(gate, require_auth));

    public.merge(protected).with_state(state)
}
