//! In-process asset cache for the inline storage strategy.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Cache of raw asset bytes keyed by the owning record's id.
///
/// The inline strategy embeds the payload in the record's locator as a data
/// URI; the cache keeps the raw bytes beside it so later retrieval does not
/// have to re-decode the locator. Implementations must be safe under
/// arbitrary concurrent puts and gets.
pub trait AssetCache: Send + Sync {
    fn put(&self, record_id: Uuid, data: Bytes);

    fn get(&self, record_id: Uuid) -> Option<Bytes>;
}

/// Process-wide in-memory cache.
///
/// Carries no eviction policy: entries live for the lifetime of the process.
/// Acceptable only because every entry mirrors a locator already embedded in
/// a persisted record.
#[derive(Default)]
pub struct MemoryAssetCache {
    inner: RwLock<HashMap<Uuid, Bytes>>,
}

impl MemoryAssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("asset cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetCache for MemoryAssetCache {
    fn put(&self, record_id: Uuid, data: Bytes) {
        self.inner
            .write()
            .expect("asset cache lock poisoned")
            .insert(record_id, data);
    }

    fn get(&self, record_id: Uuid) -> Option<Bytes> {
        self.inner
            .read()
            .expect("asset cache lock poisoned")
            .get(&record_id)
            .cloned()
    }
}

/// Cache that remembers nothing. Useful in tests and for deployments that
/// never select the inline strategy.
pub struct NoopAssetCache;

impl AssetCache for NoopAssetCache {
    fn put(&self, _record_id: Uuid, _data: Bytes) {}

    fn get(&self, _record_id: Uuid) -> Option<Bytes> {
        None
    }
}
