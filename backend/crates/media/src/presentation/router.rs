//! Media Router
//!
//! Admin-only endpoints. The caller layers the role gate on top.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{delete, post},
};
use std::sync::Arc;

use crate::application::UploadPipeline;
use crate::presentation::handlers::{self, MediaAppState};

/// Largest request body accepted by upload routes
///
/// Leaves headroom above the 10 MB cover ceiling for multipart framing.
pub const MAX_MULTIPART_BODY: usize = 12 * 1024 * 1024;

/// Create the media router
pub fn media_router(pipeline: Arc<UploadPipeline>) -> Router {
    let state = MediaAppState { pipeline };

    Router::new()
        .route("/media/images", post(handlers::upload_image))
        .route("/media/covers", post(handlers::upload_cover))
        .route("/media", delete(handlers::delete_asset))
        .layer(DefaultBodyLimit::max(MAX_MULTIPART_BODY))
        .with_state(state)
}
