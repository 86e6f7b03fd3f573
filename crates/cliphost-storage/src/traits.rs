//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement, and the error type shared between them.

use async_trait::async_trait;
use cliphost_core::StorageBackend;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All write strategies implement this trait so the upload pipeline can work
/// with any backend without coupling to implementation details. A deployment
/// picks one strategy per upload flow; the pipeline never calls more than one
/// per request.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a payload under the given key and return its locator.
    ///
    /// `record_id` identifies the owning video record; only the inline
    /// strategy uses it (as the asset cache key). The locator is the opaque
    /// string stored on the record: a public URL, a root-relative path, or a
    /// data URI depending on the backend.
    ///
    /// Writes are attempted exactly once; a failed write surfaces immediately
    /// and is never retried here.
    async fn put(
        &self,
        record_id: Uuid,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
