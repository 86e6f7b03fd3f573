//! Cliphost core library
//!
//! Shared foundation for the cliphost workspace: application configuration,
//! the unified error taxonomy, and the domain models for video records.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
