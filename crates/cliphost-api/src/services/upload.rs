//! Upload pipeline orchestration
//!
//! One function per upload flow, both walking the same stages:
//! load record → ownership gate → extract → [stage → classify] → key →
//! store → link. Any stage failure ends the request; committed side effects
//! from earlier stages are not rolled back.

use axum::extract::Multipart;
use chrono::Utc;
use cliphost_core::models::{MediaType, Video};
use cliphost_core::AppError;
use cliphost_db::StoreError;
use cliphost_processing::classify_media;
use cliphost_storage::{generate_asset_key, StorageError};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::multipart::{spool_media_field, SpooledPayload};

fn load_error_to_app(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound(id) => AppError::NotFound(format!("video {} not found", id)),
        other => AppError::Internal(format!("Failed to load video record: {}", other)),
    }
}

fn storage_error_to_app(err: StorageError) -> AppError {
    match err {
        StorageError::UnsupportedMediaType(msg) => AppError::UnsupportedMediaType(msg),
        StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
        other => AppError::Storage(other.to_string()),
    }
}

/// Load the record and enforce ownership.
///
/// Runs before any multipart field is consumed: an unauthorized caller must
/// cause no staging, storage, or cache side effects.
async fn load_owned_video(
    state: &AppState,
    video_id: Uuid,
    caller: Uuid,
) -> Result<Video, AppError> {
    let video = state
        .videos
        .get(video_id)
        .await
        .map_err(load_error_to_app)?;

    if video.owner_id != caller {
        return Err(AppError::Unauthorized(
            "Caller is not the owner of this video".to_string(),
        ));
    }

    Ok(video)
}

fn reject_empty(payload: &SpooledPayload, field_name: &str) -> Result<(), AppError> {
    if payload.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Field '{}' is empty",
            field_name
        )));
    }
    Ok(())
}

/// Persist the record with its new locator. Exactly one attempt; a failure
/// here leaves the already-written object orphaned.
async fn link_and_persist(state: &AppState, video: &Video) -> Result<(), AppError> {
    state
        .videos
        .update(video)
        .await
        .map_err(|e| AppError::Persist(e.to_string()))
}

/// Attach a thumbnail image to a video record.
pub async fn upload_thumbnail(
    state: &AppState,
    video_id: Uuid,
    caller: Uuid,
    mut multipart: Multipart,
) -> Result<Video, AppError> {
    tracing::info!(video_id = %video_id, caller = %caller, "Processing thumbnail upload");

    let mut video = load_owned_video(state, video_id, caller).await?;

    let field_name = MediaType::Image.field_name();
    let payload = spool_media_field(
        &mut multipart,
        field_name,
        &state.config.thumbnail_allowed_types,
        state.config.multipart_memory_bytes,
        state.config.max_thumbnail_bytes,
    )
    .await?;
    reject_empty(&payload, field_name)?;

    tracing::debug!(
        size_bytes = payload.len(),
        content_type = %payload.content_type(),
        "Extracted thumbnail payload"
    );

    let (data, content_type) = payload.into_bytes().await?;

    let key = generate_asset_key(&content_type, None).map_err(storage_error_to_app)?;
    let locator = state
        .thumbnail_storage
        .put(video.id, &key, &content_type, data)
        .await
        .map_err(storage_error_to_app)?;

    video.set_thumbnail_url(locator);
    video.updated_at = Utc::now();
    link_and_persist(state, &video).await?;

    tracing::info!(video_id = %video.id, "Thumbnail upload complete");

    Ok(video)
}

/// Attach a video file to a video record.
///
/// The payload is staged to a scratch file so the external prober can read
/// it; the staged file is removed when this function returns, on every path.
pub async fn upload_video(
    state: &AppState,
    video_id: Uuid,
    caller: Uuid,
    mut multipart: Multipart,
) -> Result<Video, AppError> {
    tracing::info!(video_id = %video_id, caller = %caller, "Processing video upload");

    let mut video = load_owned_video(state, video_id, caller).await?;

    let field_name = MediaType::Video.field_name();
    let payload = spool_media_field(
        &mut multipart,
        field_name,
        &state.config.video_allowed_types,
        state.config.multipart_memory_bytes,
        state.config.max_video_bytes,
    )
    .await?;
    reject_empty(&payload, field_name)?;

    tracing::debug!(
        size_bytes = payload.len(),
        content_type = %payload.content_type(),
        "Extracted video payload"
    );

    let (staged, content_type) = payload.into_staged().await?;

    let aspect = classify_media(state.probe.as_ref(), staged.path())
        .await
        .map_err(|e| AppError::Probe(e.to_string()))?;

    let key =
        generate_asset_key(&content_type, Some(aspect.as_str())).map_err(storage_error_to_app)?;

    let data = staged.read_all().await?;
    let locator = state
        .video_storage
        .put(video.id, &key, &content_type, data)
        .await
        .map_err(storage_error_to_app)?;

    video.set_video_url(locator);
    video.updated_at = Utc::now();
    link_and_persist(state, &video).await?;

    tracing::info!(video_id = %video.id, aspect = %aspect, "Video upload complete");

    Ok(video)
}
