//! Application setup: wire collaborators, build the router.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::Context;
use axum::Router;
use cliphost_core::Config;
use cliphost_db::SqliteVideoStore;
use cliphost_processing::FfprobeProbe;
use cliphost_storage::{create_storage, AssetCache, MemoryAssetCache};
use std::sync::Arc;

/// Build the application state and router from configuration.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let videos = SqliteVideoStore::connect(&config.database_url)
        .await
        .context("Failed to connect to the video store")?;

    // Both inline flows share one process-wide cache.
    let asset_cache: Arc<dyn AssetCache> = Arc::new(MemoryAssetCache::new());

    let thumbnail_storage = create_storage(
        config.thumbnail_storage_backend,
        &config,
        asset_cache.clone(),
    )
    .await
    .context("Failed to initialize thumbnail storage")?;

    let video_storage = create_storage(config.video_storage_backend, &config, asset_cache)
        .await
        .context("Failed to initialize video storage")?;

    let probe = FfprobeProbe::new(config.ffprobe_path.clone())
        .map_err(|e| anyhow::anyhow!("Invalid ffprobe configuration: {}", e))?;

    let state = Arc::new(AppState {
        config: config.clone(),
        videos: Arc::new(videos),
        thumbnail_storage,
        video_storage,
        probe: Arc::new(probe),
    });

    let router = routes::build_router(state.clone())?;

    tracing::info!(
        thumbnail_backend = %config.thumbnail_storage_backend,
        video_backend = %config.video_storage_backend,
        ffprobe_path = %config.ffprobe_path,
        "Application initialized"
    );

    Ok((state, router))
}
