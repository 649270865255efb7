//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State, multipart::MultipartRejection};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::UploadPipeline;
use crate::domain::asset::StoredAsset;
use crate::domain::policy::UploadPolicy;
use crate::error::{MediaError, MediaResult};
use crate::presentation::dto::{DeleteAssetRequest, DeleteAssetResponse};
use crate::presentation::multipart::{multipart_rejection, read_form};

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// Shared state for media handlers
#[derive(Clone)]
pub struct MediaAppState {
    pub pipeline: Arc<UploadPipeline>,
}

/// POST /media/images
pub async fn upload_image(
    State(state): State<MediaAppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> MediaResult<(StatusCode, Json<StoredAsset>)> {
    upload_with_policy(&state, multipart, UploadPolicy::content_image()).await
}

/// POST /media/covers
pub async fn upload_cover(
    State(state): State<MediaAppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> MediaResult<(StatusCode, Json<StoredAsset>)> {
    upload_with_policy(&state, multipart, UploadPolicy::blog_cover()).await
}

async fn upload_with_policy(
    state: &MediaAppState,
    multipart: Result<Multipart, MultipartRejection>,
    policy: UploadPolicy,
) -> MediaResult<(StatusCode, Json<StoredAsset>)> {
    let multipart = multipart.map_err(multipart_rejection)?;
    let form = read_form(multipart, &[IMAGE_FIELD], &policy).await?;

    let file = form
        .file
        .ok_or_else(|| MediaError::Validation("Please upload an image file".to_string()))?;

    let asset = state.pipeline.store(file, &policy).await?;

    Ok((StatusCode::CREATED, Json(asset)))
}

/// DELETE /media
pub async fn delete_asset(
    State(state): State<MediaAppState>,
    payload: Result<Json<DeleteAssetRequest>, JsonRejection>,
) -> MediaResult<Json<DeleteAssetResponse>> {
    let Json(req) = payload.map_err(|_| {
        MediaError::Validation("Please provide publicId and provider".to_string())
    })?;

    if req.public_id.trim().is_empty() {
        return Err(MediaError::Validation(
            "Please provide publicId and provider".to_string(),
        ));
    }

    let deleted = state.pipeline.delete(&req.public_id, req.provider).await;

    Ok(Json(DeleteAssetResponse { deleted }))
}
