pub mod health;
pub mod thumbnail_upload;
pub mod video_upload;

use cliphost_core::AppError;
use uuid::Uuid;

/// Parse a path segment into a video id. Invalid identifiers are a 400, not
/// a framework rejection, so they render through the standard error shape.
pub(crate) fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|e| AppError::InvalidInput(format!("Invalid video id: {}", e)))
}
