//! Scripted probes so classification is testable without spawning ffprobe.

use async_trait::async_trait;
use cliphost_processing::{MediaProbe, ProbeError, ProbeOutput, ProbeStream};
use std::path::Path;

/// Reports fixed frame dimensions for any file.
pub struct FixedDimensionsProbe {
    pub width: u32,
    pub height: u32,
}

#[async_trait]
impl MediaProbe for FixedDimensionsProbe {
    async fn probe(&self, _path: &Path) -> Result<ProbeOutput, ProbeError> {
        Ok(ProbeOutput {
            streams: vec![ProbeStream {
                width: Some(self.width),
                height: Some(self.height),
            }],
        })
    }
}

/// Reports a sole stream with the height missing.
pub struct MissingHeightProbe;

#[async_trait]
impl MediaProbe for MissingHeightProbe {
    async fn probe(&self, _path: &Path) -> Result<ProbeOutput, ProbeError> {
        Ok(ProbeOutput {
            streams: vec![ProbeStream {
                width: Some(1920),
                height: None,
            }],
        })
    }
}

/// Fails outright, as a crashed ffprobe would.
pub struct FailingProbe;

#[async_trait]
impl MediaProbe for FailingProbe {
    async fn probe(&self, _path: &Path) -> Result<ProbeOutput, ProbeError> {
        Err(ProbeError::Failed("simulated probe crash".to_string()))
    }
}
