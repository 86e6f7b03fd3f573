//! Domain models

mod video;

pub use video::{NewVideo, Video, VideoResponse};

/// Media kinds accepted by the upload endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Multipart field name the endpoint expects for this media kind.
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaType::Image => "thumbnail",
            MediaType::Video => "video",
        }
    }
}
