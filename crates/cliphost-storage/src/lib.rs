//! Cliphost storage library
//!
//! Storage abstraction and implementations for uploaded media. One `Storage`
//! trait, three interchangeable write strategies selected by configuration:
//!
//! - **S3**: the payload is streamed to a remote bucket and the locator is the
//!   object's public URL.
//! - **Local**: the payload is written under a local asset root and the
//!   locator is a root-relative path served by a separate static handler.
//! - **Inline**: the payload is embedded in the locator itself as a data URI,
//!   with the raw bytes retained in an in-process asset cache.
//!
//! # Storage key format
//!
//! Keys are `{random}.{ext}` where `random` is 32 random bytes base64url
//! encoded without padding, optionally prefixed with an aspect bucket
//! (`landscape/{random}.mp4`). Keys must not contain `..` or a leading `/`.
//! Key generation is centralized in the `keys` module so all backends stay
//! consistent.

pub mod cache;
pub mod factory;
pub mod inline;
pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

pub use cache::{AssetCache, MemoryAssetCache, NoopAssetCache};
pub use cliphost_core::StorageBackend;
pub use factory::create_storage;
pub use inline::InlineStorage;
pub use keys::generate_asset_key;
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
