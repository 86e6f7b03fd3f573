//! Aspect-ratio classification
//!
//! Pure function of frame dimensions. Ratios within the tolerance band
//! around 16:9 map to landscape, around 9:16 to portrait, everything else
//! to other. No other probe signal (duration, codec) participates.

use std::fmt::{Display, Formatter, Result as FmtResult};

const ASPECT_TOLERANCE: f64 = 1e-2;

/// Aspect bucket of a video frame. Video storage keys are prefixed with the
/// lowercase bucket name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Landscape,
    Portrait,
    Other,
}

impl AspectRatio {
    /// Classify frame dimensions into an aspect bucket.
    pub fn classify(width: u32, height: u32) -> Self {
        let ratio = f64::from(width) / f64::from(height);
        if (ratio - 16.0 / 9.0).abs() < ASPECT_TOLERANCE {
            AspectRatio::Landscape
        } else if (ratio - 9.0 / 16.0).abs() < ASPECT_TOLERANCE {
            AspectRatio::Portrait
        } else {
            AspectRatio::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape",
            AspectRatio::Portrait => "portrait",
            AspectRatio::Other => "other",
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
