//! Storage backend selection types

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Available storage backends for uploaded assets.
///
/// Each upload flow (thumbnail, video) selects exactly one backend via
/// configuration; the strategies are interchangeable behind the `Storage`
/// trait in `cliphost-storage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Remote object store (S3 or S3-compatible endpoint).
    S3,
    /// Local filesystem under a configured asset root, served statically.
    Local,
    /// Data-URI embedded directly in the record's locator field.
    Inline,
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Inline => write!(f, "inline"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            "inline" => Ok(StorageBackend::Inline),
            other => Err(format!(
                "unknown storage backend '{}' (expected 's3', 'local' or 'inline')",
                other
            )),
        }
    }
}
