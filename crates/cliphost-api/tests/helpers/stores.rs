//! Record store doubles for failure injection.

use async_trait::async_trait;
use cliphost_core::models::{NewVideo, Video};
use cliphost_db::{StoreError, VideoStore};
use std::sync::Arc;
use uuid::Uuid;

/// Delegates reads and creates to the inner store but fails every update,
/// simulating a persistence outage after the storage write succeeded.
pub struct UpdateFailsStore {
    inner: Arc<dyn VideoStore>,
}

impl UpdateFailsStore {
    pub fn new(inner: Arc<dyn VideoStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl VideoStore for UpdateFailsStore {
    async fn create(&self, new_video: NewVideo) -> Result<Video, StoreError> {
        self.inner.create(new_video).await
    }

    async fn get(&self, id: Uuid) -> Result<Video, StoreError> {
        self.inner.get(id).await
    }

    async fn update(&self, _video: &Video) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }
}
