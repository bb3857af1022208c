//! The exported trail document (`trail.json`).
//!
//! The canonical persisted representation of a detection pass: the flat
//! `[t, x, y]` position list plus the parameters used to produce it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sample::PositionSample;
use crate::settings::{DetectionSettings, HeatmapSettings, TimeWindow};
use crate::trail::CursorTrail;

/// Top-level trail document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailDocument {
    /// Source video description.
    #[serde(rename = "video_info")]
    pub video: VideoInfo,

    /// Detected positions as `[t, x, y]` triples, earliest first.
    #[serde(rename = "cursor_positions")]
    pub positions: Vec<PositionSample>,

    /// The time window active when the document was written.
    #[serde(rename = "heatmap_range")]
    pub window: TimeWindow,

    /// Heatmap parameters active when the document was written.
    #[serde(rename = "heatmap_settings")]
    pub heatmap: HeatmapSettings,

    /// Detection parameters the pass ran with.
    #[serde(rename = "detection_settings", default)]
    pub detection: DetectionSettings,

    /// Document creation time (ISO 8601).
    #[serde(default)]
    pub created_at: String,
}

/// Source video description recorded alongside the positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Video duration in seconds.
    pub duration: f64,

    /// Frames per second.
    pub fps: f64,

    /// Source file or directory name, for display only.
    pub filename: String,
}

impl TrailDocument {
    /// Assemble a document from a finished pass, stamped with the current
    /// wall-clock time.
    pub fn new(
        video: VideoInfo,
        trail: &CursorTrail,
        window: TimeWindow,
        detection: DetectionSettings,
        heatmap: HeatmapSettings,
    ) -> Self {
        Self {
            video,
            positions: trail.samples().to_vec(),
            window,
            heatmap,
            detection,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Rebuild the trail value from the stored positions.
    pub fn trail(&self) -> CursorTrail {
        CursorTrail::from_samples(self.positions.clone())
    }

    /// Write the document as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| DocumentError::IoError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| DocumentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| DocumentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Read a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DocumentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| DocumentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Errors that can occur when reading or writing trail documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}
