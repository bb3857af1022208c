//! Position samples produced by the detection pass.

use serde::{Deserialize, Serialize};

/// A single detected cursor position.
///
/// Serializes as a `[timestamp, x, y]` array, the canonical exported form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, u32, u32)", into = "(f64, u32, u32)")]
pub struct PositionSample {
    /// Fractional seconds since the start of the video.
    pub timestamp_secs: f64,

    /// Horizontal pixel coordinate, `0 <= x < width`.
    pub x: u32,

    /// Vertical pixel coordinate, `0 <= y < height`.
    pub y: u32,
}

impl PositionSample {
    /// Create a sample at the given timestamp and pixel position.
    pub fn new(timestamp_secs: f64, x: u32, y: u32) -> Self {
        Self {
            timestamp_secs,
            x,
            y,
        }
    }

    /// Whether the sample lies within a frame of the given dimensions.
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }
}

impl From<(f64, u32, u32)> for PositionSample {
    fn from((timestamp_secs, x, y): (f64, u32, u32)) -> Self {
        Self {
            timestamp_secs,
            x,
            y,
        }
    }
}

impl From<PositionSample> for (f64, u32, u32) {
    fn from(sample: PositionSample) -> Self {
        (sample.timestamp_secs, sample.x, sample.y)
    }
}
