//! Configuration module
//!
//! Environment-driven configuration for the API service. A `.env` file is
//! honored when present; every knob has a default except the JWT secret.

use std::env;

use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "sqlite:cliphost.db?mode=rwc";
const DEFAULT_FFPROBE_PATH: &str = "ffprobe";
const DEFAULT_ASSETS_ROOT: &str = "./assets";
const DEFAULT_ASSETS_PUBLIC_BASE: &str = "/assets";
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Whole request bodies are capped here before multipart parsing begins.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 1 << 30; // 1 GiB
/// Multipart payloads stay in memory up to this threshold, then spill to disk.
const DEFAULT_MULTIPART_MEMORY_BYTES: usize = 10 << 20; // 10 MiB
const DEFAULT_MAX_THUMBNAIL_BYTES: usize = 10 << 20; // 10 MiB
const DEFAULT_MAX_VIDEO_BYTES: usize = 1 << 30; // 1 GiB

const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,

    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,

    pub database_url: String,

    pub thumbnail_storage_backend: StorageBackend,
    pub video_storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub assets_root: String,
    pub assets_public_base: String,

    pub ffprobe_path: String,

    pub max_upload_bytes: usize,
    pub multipart_memory_bytes: usize,
    pub max_thumbnail_bytes: usize,
    pub max_video_bytes: usize,

    pub thumbnail_allowed_types: Vec<String>,
    pub video_allowed_types: Vec<String>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, anyhow::Error> {
    match env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("Invalid value for {}: '{}'", key, value)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let config = Config {
            server_port: env_or("PORT", DEFAULT_PORT)?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            cors_origins,
            jwt_secret,
            jwt_expiry_hours: env_or("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            thumbnail_storage_backend: env_or(
                "THUMBNAIL_STORAGE_BACKEND",
                StorageBackend::Local,
            )?,
            video_storage_backend: env_or("VIDEO_STORAGE_BACKEND", StorageBackend::S3)?,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok().or_else(|| env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            assets_root: env::var("ASSETS_ROOT").unwrap_or_else(|_| DEFAULT_ASSETS_ROOT.to_string()),
            assets_public_base: env::var("ASSETS_PUBLIC_BASE")
                .unwrap_or_else(|_| DEFAULT_ASSETS_PUBLIC_BASE.to_string()),
            ffprobe_path: env::var("FFPROBE_PATH")
                .unwrap_or_else(|_| DEFAULT_FFPROBE_PATH.to_string()),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            multipart_memory_bytes: env_or(
                "MULTIPART_MEMORY_BYTES",
                DEFAULT_MULTIPART_MEMORY_BYTES,
            )?,
            max_thumbnail_bytes: env_or("MAX_THUMBNAIL_BYTES", DEFAULT_MAX_THUMBNAIL_BYTES)?,
            max_video_bytes: env_or("MAX_VIDEO_BYTES", DEFAULT_MAX_VIDEO_BYTES)?,
            thumbnail_allowed_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
            ],
            video_allowed_types: vec!["video/mp4".to_string()],
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            anyhow::bail!(
                "JWT_SECRET must be at least {} characters",
                MIN_JWT_SECRET_LEN
            );
        }

        let uses_s3 = self.thumbnail_storage_backend == StorageBackend::S3
            || self.video_storage_backend == StorageBackend::S3;
        if uses_s3 {
            if self.s3_bucket.is_none() {
                anyhow::bail!("S3_BUCKET must be set when an S3 storage backend is selected");
            }
            if self.s3_region.is_none() {
                anyhow::bail!(
                    "S3_REGION or AWS_REGION must be set when an S3 storage backend is selected"
                );
            }
        }

        if self.multipart_memory_bytes == 0 {
            anyhow::bail!("MULTIPART_MEMORY_BYTES must be greater than zero");
        }
        if self.max_upload_bytes < self.max_video_bytes {
            anyhow::bail!("MAX_UPLOAD_BYTES must be at least MAX_VIDEO_BYTES");
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// True when either upload flow serves files from the local asset root.
    pub fn serves_local_assets(&self) -> bool {
        self.thumbnail_storage_backend == StorageBackend::Local
            || self.video_storage_backend == StorageBackend::Local
    }
}
