use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cliphost_core::models::{NewVideo, Video};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("video not found: {0}")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Persistence boundary for video records.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn create(&self, new_video: NewVideo) -> Result<Video, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Video, StoreError>;

    /// Persist the record as given, including locator fields. The write is
    /// a full replace of the mutable columns; last write wins.
    async fn update(&self, video: &Video) -> Result<(), StoreError>;
}

/// SQLite-backed video store.
#[derive(Clone)]
pub struct SqliteVideoStore {
    pool: SqlitePool,
}

impl SqliteVideoStore {
    /// Connect to the database and bootstrap the schema.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        // Each connection to "sqlite::memory:" gets its own database, so
        // in-memory URLs must be pinned to a single connection.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS videos (
                id            TEXT PRIMARY KEY,
                owner_id      TEXT NOT NULL,
                title         TEXT NOT NULL,
                description   TEXT,
                thumbnail_url TEXT,
                video_url     TEXT,
                created_at    TEXT NOT NULL,
                updated_at    TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn row_to_video(row: &SqliteRow) -> Result<Video, StoreError> {
    let parse_uuid = |column: &str, value: String| {
        Uuid::parse_str(&value)
            .map_err(|e| StoreError::Corrupt(format!("invalid {} '{}': {}", column, value, e)))
    };

    Ok(Video {
        id: parse_uuid("id", row.try_get("id")?)?,
        owner_id: parse_uuid("owner_id", row.try_get("owner_id")?)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        thumbnail_url: row.try_get("thumbnail_url")?,
        video_url: row.try_get("video_url")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

#[async_trait]
impl VideoStore for SqliteVideoStore {
    async fn create(&self, new_video: NewVideo) -> Result<Video, StoreError> {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            owner_id: new_video.owner_id,
            title: new_video.title,
            description: new_video.description,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO videos (id, owner_id, title, description, thumbnail_url, video_url, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(video.id.to_string())
        .bind(video.owner_id.to_string())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(video_id = %video.id, owner_id = %video.owner_id, "Created video record");

        Ok(video)
    }

    async fn get(&self, id: Uuid) -> Result<Video, StoreError> {
        let row = sqlx::query("SELECT * FROM videos WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        row_to_video(&row)
    }

    async fn update(&self, video: &Video) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET title = ?1, description = ?2, thumbnail_url = ?3, video_url = ?4, updated_at = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.updated_at)
        .bind(video.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(video.id));
        }

        Ok(())
    }
}
