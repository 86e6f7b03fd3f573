use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A video record owned by a single user.
///
/// The locator fields are opaque strings: depending on the active storage
/// strategy they hold a remote object URL, a root-relative asset path, or an
/// inline data URI. Mutating either locator requires the caller to be the
/// record's owner; a new upload replaces the previous value outright.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Replace the thumbnail locator. Always overwrites; never appends.
    pub fn set_thumbnail_url(&mut self, locator: String) {
        self.thumbnail_url = Some(locator);
    }

    /// Replace the video locator. Always overwrites; never appends.
    pub fn set_video_url(&mut self, locator: String) {
        self.video_url = Some(locator);
    }
}

/// Fields required to create a video record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewVideo {
    pub owner_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// API representation of a video record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        VideoResponse {
            id: video.id,
            owner_id: video.owner_id,
            title: video.title,
            description: video.description,
            thumbnail_url: video.thumbnail_url,
            video_url: video.video_url,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}
