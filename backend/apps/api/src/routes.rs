//! Route Table
//!
//! Every route is reachable both at `/x` and at `/api/x`.

use std::path::Path;
use std::sync::Arc;

use auth::{AuthConfig, GateState, PgUserRepository, auth_router, require_admin};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use kernel::error::app_error::AppError;
use media::{MAX_MULTIPART_BODY, UploadPipeline, media_router};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Prefix every route is also mounted under
pub const API_PREFIX: &str = "/api";

/// Routes served by this binary, without aliasing or outer layers
pub fn api_routes(pool: PgPool, auth_config: Arc<AuthConfig>, pipeline: Arc<UploadPipeline>) -> Router {
    let admin_gate = GateState::new(auth_config.clone());

    let media = media_router(pipeline.clone())
        .route_layer(from_fn_with_state(admin_gate, require_admin));

    Router::new()
        .route("/health", get(health))
        .merge(auth_router(PgUserRepository::new(pool), auth_config, pipeline))
        .merge(media)
}

/// Mount `routes` at the root and under [`API_PREFIX`]
pub fn with_api_alias(routes: Router) -> Router {
    Router::new()
        .nest(API_PREFIX, routes.clone())
        .merge(routes)
}

/// Full application: aliased routes, static uploads and outer layers
pub fn app(routes: Router, uploads_dir: &Path, frontend_origins: &[String]) -> Router {
    with_api_alias(routes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors(frontend_origins))
                .layer(DefaultBodyLimit::max(MAX_MULTIPART_BODY)),
        )
}

fn cors(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}
