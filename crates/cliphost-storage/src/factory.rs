use crate::cache::AssetCache;
use crate::{InlineStorage, LocalStorage, S3Storage, Storage, StorageError, StorageResult};
use cliphost_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create a storage backend for one upload flow.
///
/// The thumbnail and video flows each call this with their configured
/// backend; both inline flows share the same asset cache.
pub async fn create_storage(
    backend: StorageBackend,
    config: &Config,
    cache: Arc<dyn AssetCache>,
) -> StorageResult<Arc<dyn Storage>> {
    match backend {
        StorageBackend::S3 => {
            let bucket = config.s3_bucket.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_BUCKET not configured".to_string())
            })?;
            let region = config.s3_region.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint.clone();

            let storage = S3Storage::new(bucket, region, endpoint)?;
            Ok(Arc::new(storage))
        }

        StorageBackend::Local => {
            let storage = LocalStorage::new(
                config.assets_root.clone(),
                config.assets_public_base.clone(),
            )
            .await?;
            Ok(Arc::new(storage))
        }

        StorageBackend::Inline => Ok(Arc::new(InlineStorage::new(cache))),
    }
}
