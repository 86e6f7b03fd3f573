//! Cliphost processing library
//!
//! Media handling steps that sit between multipart extraction and storage:
//! scratch-file staging for processes that need filesystem access, the
//! `MediaProbe` seam over ffprobe, and aspect-ratio classification.

pub mod aspect;
pub mod probe;
pub mod staging;

pub use aspect::AspectRatio;
pub use probe::{classify_media, FfprobeProbe, MediaProbe, ProbeError, ProbeOutput, ProbeStream};
pub use staging::StagedMedia;
