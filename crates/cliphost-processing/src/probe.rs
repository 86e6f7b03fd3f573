//! Media probing via an external ffprobe process.
//!
//! The probe is an injectable seam: classification logic runs against the
//! `MediaProbe` trait so tests never have to spawn a real process.

use crate::aspect::AspectRatio;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

/// Probe operation errors. Every variant is terminal for the request that
/// triggered the probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to execute ffprobe: {0}")]
    Exec(String),

    #[error("ffprobe exited with an error: {0}")]
    Failed(String),

    #[error("failed to parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("probe output contains no streams")]
    NoStreams,

    #[error("first stream is missing width or height")]
    MissingDimensions,

    #[error("invalid probe configuration: {0}")]
    Config(String),
}

/// Structured stream metadata as reported by the probe.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeOutput {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeStream {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ProbeOutput {
    /// Width and height of the first stream. Both must be present.
    pub fn primary_dimensions(&self) -> Result<(u32, u32), ProbeError> {
        let stream = self.streams.first().ok_or(ProbeError::NoStreams)?;
        match (stream.width, stream.height) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(ProbeError::MissingDimensions),
        }
    }
}

/// Seam over "given a file path, return parsed stream metadata".
#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError>;
}

/// Probe a staged file and classify its frame dimensions.
pub async fn classify_media(
    probe: &dyn MediaProbe,
    path: &Path,
) -> Result<AspectRatio, ProbeError> {
    let output = probe.probe(path).await?;
    let (width, height) = output.primary_dimensions()?;
    let aspect = AspectRatio::classify(width, height);

    tracing::debug!(
        width = width,
        height = height,
        aspect = %aspect,
        "Classified media dimensions"
    );

    Ok(aspect)
}

/// ffprobe-backed implementation of [`MediaProbe`].
pub struct FfprobeProbe {
    ffprobe_path: String,
}

/// Reject executable paths containing shell metacharacters.
fn validate_executable_path(path: &str) -> Result<(), ProbeError> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.chars().any(|c| dangerous_chars.contains(&c)) || path.contains("..") {
        return Err(ProbeError::Config(format!(
            "ffprobe path contains unsafe characters: {}",
            path
        )));
    }
    Ok(())
}

impl FfprobeProbe {
    pub fn new(ffprobe_path: String) -> Result<Self, ProbeError> {
        validate_executable_path(&ffprobe_path)?;
        Ok(Self { ffprobe_path })
    }
}

#[async_trait]
impl MediaProbe for FfprobeProbe {
    #[tracing::instrument(skip(self), fields(ffprobe_path = %self.ffprobe_path))]
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError> {
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .output()
            .await
            .map_err(|e| ProbeError::Exec(e.to_string()))?;

        if !output.status.success() {
            return Err(ProbeError::Failed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let parsed: ProbeOutput = serde_json::from_slice(&output.stdout)?;

        tracing::info!(
            streams = parsed.streams.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Media probe completed"
        );

        Ok(parsed)
    }
}
