//! Scratch-file staging for uploaded payloads.
//!
//! The external prober needs filesystem access, so video payloads are staged
//! to a scratch file before classification. The file is tied to the value's
//! lifetime: dropping a `StagedMedia` removes it, on every exit path.

use std::io;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// A scratch file holding the exact uploaded bytes.
///
/// Created per request and never shared. Removal is unconditional on drop,
/// covering success, validation failure, storage failure, and early returns.
pub struct StagedMedia {
    temp: NamedTempFile,
    file: fs::File,
    bytes_written: u64,
}

impl StagedMedia {
    pub async fn create() -> io::Result<Self> {
        let temp = NamedTempFile::new()?;
        let file = fs::File::from_std(temp.reopen()?);
        Ok(Self {
            temp,
            file,
            bytes_written: 0,
        })
    }

    /// Append a chunk of the upload to the scratch file.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.bytes_written += chunk.len() as u64;
        Ok(())
    }

    /// Flush and sync after the last chunk so the prober sees every byte.
    pub async fn finish(&mut self) -> io::Result<()> {
        self.file.flush().await?;
        self.file.sync_all().await
    }

    /// Path handed to file-path-based consumers (the prober).
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn len(&self) -> u64 {
        self.bytes_written
    }

    pub fn is_empty(&self) -> bool {
        self.bytes_written == 0
    }

    /// Read the staged bytes back for the storage write.
    pub async fn read_all(&self) -> io::Result<Vec<u8>> {
        fs::read(self.path()).await
    }
}
