//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p cliphost-api`.

pub mod probes;
pub mod stores;

use axum_test::TestServer;
use cliphost_api::auth::jwt;
use cliphost_api::setup::routes::build_router;
use cliphost_api::state::AppState;
use cliphost_core::models::{NewVideo, Video};
use cliphost_core::{Config, StorageBackend};
use cliphost_db::{SqliteVideoStore, VideoStore};
use cliphost_processing::MediaProbe;
use cliphost_storage::{create_storage, AssetCache, MemoryAssetCache};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Small in-memory threshold so larger uploads exercise the disk spill path.
const TEST_MEMORY_THRESHOLD: usize = 64 * 1024;
const TEST_MAX_THUMBNAIL_BYTES: usize = 1024 * 1024;
const TEST_MAX_VIDEO_BYTES: usize = 8 * 1024 * 1024;

/// Knobs for a test application. Defaults: local storage for both flows,
/// a probe that reports 1920x1080, the real SQLite store.
pub struct TestAppOptions {
    pub thumbnail_backend: StorageBackend,
    pub video_backend: StorageBackend,
    pub probe: Arc<dyn MediaProbe>,
    pub videos: Option<Arc<dyn VideoStore>>,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            thumbnail_backend: StorageBackend::Local,
            video_backend: StorageBackend::Local,
            probe: Arc::new(probes::FixedDimensionsProbe {
                width: 1920,
                height: 1080,
            }),
            videos: None,
        }
    }
}

/// Test application: server plus handles on the collaborators for
/// side-effect assertions.
pub struct TestApp {
    pub server: TestServer,
    pub videos: Arc<dyn VideoStore>,
    pub cache: Arc<MemoryAssetCache>,
    pub assets_root: PathBuf,
    _assets_dir: TempDir,
}

impl TestApp {
    /// Create a record owned by `owner_id`.
    pub async fn create_video(&self, owner_id: Uuid) -> Video {
        self.videos
            .create(NewVideo {
                owner_id,
                title: "test video".to_string(),
                description: None,
            })
            .await
            .expect("Failed to create test video")
    }

    /// Number of files under the local asset root (recursively).
    pub fn stored_file_count(&self) -> usize {
        count_files(&self.assets_root)
    }

    pub fn bearer_token(&self, user_id: Uuid) -> String {
        jwt::issue_token(user_id, TEST_JWT_SECRET, 1).expect("Failed to issue test token")
    }
}

fn count_files(dir: &Path) -> usize {
    let mut count = 0;
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                count += count_files(&path);
            } else {
                count += 1;
            }
        }
    }
    count
}

fn test_config(assets_root: &Path, options: &TestAppOptions) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec![],
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 1,
        database_url: "sqlite::memory:".to_string(),
        thumbnail_storage_backend: options.thumbnail_backend,
        video_storage_backend: options.video_backend,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        assets_root: assets_root.to_string_lossy().to_string(),
        assets_public_base: "/assets".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        max_upload_bytes: 1 << 30,
        multipart_memory_bytes: TEST_MEMORY_THRESHOLD,
        max_thumbnail_bytes: TEST_MAX_THUMBNAIL_BYTES,
        max_video_bytes: TEST_MAX_VIDEO_BYTES,
        thumbnail_allowed_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        video_allowed_types: vec!["video/mp4".to_string()],
    }
}

/// Setup a test app with default options.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

/// Setup a test app with isolated storage, an in-memory record store, and
/// the given collaborator substitutions.
pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let assets_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(assets_dir.path(), &options);

    let videos: Arc<dyn VideoStore> = match options.videos.clone() {
        Some(store) => store,
        None => Arc::new(
            SqliteVideoStore::connect(&config.database_url)
                .await
                .expect("Failed to create test store"),
        ),
    };

    let cache = Arc::new(MemoryAssetCache::new());
    let cache_dyn: Arc<dyn AssetCache> = cache.clone();

    let thumbnail_storage = create_storage(
        config.thumbnail_storage_backend,
        &config,
        cache_dyn.clone(),
    )
    .await
    .expect("Failed to create thumbnail storage");
    let video_storage = create_storage(config.video_storage_backend, &config, cache_dyn)
        .await
        .expect("Failed to create video storage");

    let state = Arc::new(AppState {
        config,
        videos: videos.clone(),
        thumbnail_storage,
        video_storage,
        probe: options.probe.clone(),
    });

    let router = build_router(state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        videos,
        cache,
        assets_root: assets_dir.path().to_path_buf(),
        _assets_dir: assets_dir,
    }
}
