use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use cliphost_core::models::VideoResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/videos/{video_id}/thumbnail",
    tag = "uploads",
    params(
        ("video_id" = String, Path, description = "Video record identifier")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Multipart body with a 'thumbnail' field (image/jpeg or image/png)"),
    responses(
        (status = 200, description = "Thumbnail attached", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = super::parse_video_id(&video_id)?;
    let video = upload::upload_thumbnail(&state, video_id, caller, multipart).await?;
    Ok(Json(VideoResponse::from(video)))
}
