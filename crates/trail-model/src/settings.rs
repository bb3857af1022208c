//! Detection and heatmap parameters.
//!
//! These are interactive-tuning parameters: degenerate values are repaired
//! to the nearest valid value by `normalized()` rather than rejected, so a
//! slider at an odd position never turns into a hard failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Parameters for one detection pass. Immutable for the pass duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSettings {
    /// Pixel-intensity difference threshold; differences above it are
    /// foreground.
    pub threshold: u8,

    /// Minimum accepted blob area in pixels.
    pub min_area: u32,

    /// Maximum accepted blob area in pixels.
    pub max_area: u32,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            threshold: 15,
            min_area: 3,
            max_area: 500,
        }
    }
}

impl DetectionSettings {
    /// Repair degenerate values: a zero threshold becomes 1, a zero
    /// `max_area` becomes 1, and `min_area` is clamped down to `max_area`
    /// when the pair is inverted.
    pub fn normalized(self) -> Self {
        let threshold = self.threshold.max(1);
        let max_area = self.max_area.max(1);
        let min_area = self.min_area.max(1).min(max_area);
        Self {
            threshold,
            min_area,
            max_area,
        }
    }
}

/// Parameters for one heatmap build/composite call.
///
/// May change freely between calls without touching the trail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapSettings {
    /// Splat diameter basis; the disk radius derives as `resolution / 4`.
    pub resolution: u32,

    /// Gaussian blur kernel size. Must be odd; even values are corrected
    /// upward.
    pub blur_size: u32,

    /// Peak overlay opacity. The densest pixel reaches this alpha, never
    /// full opacity by default.
    #[serde(default = "default_alpha_max")]
    pub alpha_max: f32,

    /// Color palette for the overlay.
    pub colormap: Colormap,
}

fn default_alpha_max() -> f32 {
    0.7
}

impl Default for HeatmapSettings {
    fn default() -> Self {
        Self {
            resolution: 100,
            blur_size: 15,
            alpha_max: 0.7,
            colormap: Colormap::Hot,
        }
    }
}

impl HeatmapSettings {
    /// Repair degenerate values: even blur sizes are incremented to the
    /// next odd value (never below 3), the resolution is kept positive,
    /// and `alpha_max` is clamped to `[0, 1]`.
    pub fn normalized(self) -> Self {
        let blur_size = if self.blur_size % 2 == 1 {
            self.blur_size.max(3)
        } else {
            (self.blur_size + 1).max(3)
        };
        Self {
            resolution: self.resolution.max(1),
            blur_size,
            alpha_max: self.alpha_max.clamp(0.0, 1.0),
            colormap: self.colormap,
        }
    }

    /// Splat disk radius derived from the resolution, at least 1.
    pub fn point_radius(&self) -> u32 {
        (self.resolution / 4).max(1)
    }
}

/// A time interval over the trail, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window start in seconds.
    #[serde(rename = "start")]
    pub start_secs: f64,

    /// Window end in seconds.
    #[serde(rename = "end")]
    pub end_secs: f64,
}

impl TimeWindow {
    /// Create a window spanning `[start_secs, end_secs]`.
    pub fn new(start_secs: f64, end_secs: f64) -> Self {
        Self {
            start_secs,
            end_secs,
        }
    }

    /// A window covering `[0, duration_secs]`.
    pub fn full(duration_secs: f64) -> Self {
        Self::new(0.0, duration_secs)
    }

    /// An inverted window (`start > end`) selects nothing.
    pub fn is_empty(&self) -> bool {
        self.start_secs > self.end_secs
    }

    /// Inclusive containment test: `start <= t <= end`.
    pub fn contains(&self, timestamp_secs: f64) -> bool {
        timestamp_secs >= self.start_secs && timestamp_secs <= self.end_secs
    }
}

/// Supported heatmap palettes.
///
/// A closed set; lookup tables live with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Hot,
    Jet,
    Inferno,
    Plasma,
    Viridis,
}

impl Colormap {
    /// All supported palettes, in UI order.
    pub const ALL: [Colormap; 5] = [
        Colormap::Hot,
        Colormap::Jet,
        Colormap::Inferno,
        Colormap::Plasma,
        Colormap::Viridis,
    ];

    /// Lowercase palette name.
    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Hot => "hot",
            Colormap::Jet => "jet",
            Colormap::Inferno => "inferno",
            Colormap::Plasma => "plasma",
            Colormap::Viridis => "viridis",
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown colormap name.
#[derive(Debug, thiserror::Error)]
#[error("unknown colormap: {0}")]
pub struct ParseColormapError(String);

impl FromStr for Colormap {
    type Err = ParseColormapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hot" => Ok(Colormap::Hot),
            "jet" => Ok(Colormap::Jet),
            "inferno" => Ok(Colormap::Inferno),
            "plasma" => Ok(Colormap::Plasma),
            "viridis" => Ok(Colormap::Viridis),
            other => Err(ParseColormapError(other.to_string())),
        }
    }
}
