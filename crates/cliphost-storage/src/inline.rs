use crate::cache::AssetCache;
use crate::traits::{Storage, StorageResult};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use cliphost_core::StorageBackend;
use std::sync::Arc;
use uuid::Uuid;

/// Inline data-URI storage implementation
///
/// No external write happens: the payload is base64-encoded into the locator
/// itself (`data:{contentType};base64,{payload}`), and the raw bytes are
/// retained in the in-process asset cache keyed by the owning record.
#[derive(Clone)]
pub struct InlineStorage {
    cache: Arc<dyn AssetCache>,
}

impl InlineStorage {
    pub fn new(cache: Arc<dyn AssetCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl Storage for InlineStorage {
    async fn put(
        &self,
        record_id: Uuid,
        _key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let size = data.len();
        let bytes = Bytes::from(data);

        let locator = format!("data:{};base64,{}", content_type, STANDARD.encode(&bytes));
        self.cache.put(record_id, bytes);

        tracing::info!(
            record_id = %record_id,
            size_bytes = size,
            content_type = %content_type,
            "Inline data URI generated"
        );

        Ok(locator)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Inline
    }
}
