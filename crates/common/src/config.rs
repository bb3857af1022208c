//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default detection-pass parameters.
    pub detection: DetectionDefaults,

    /// Default heatmap parameters.
    pub heatmap: HeatmapDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default detection-pass parameters.
///
/// Interactive-tuning ranges; out-of-range values are repaired rather than
/// rejected when converted to typed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionDefaults {
    /// Pixel-intensity difference threshold.
    pub threshold: u8,

    /// Minimum accepted blob area in pixels.
    pub min_area: u32,

    /// Maximum accepted blob area in pixels.
    pub max_area: u32,
}

/// Default heatmap parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapDefaults {
    /// Splat diameter basis (disk radius derives as `resolution / 4`).
    pub resolution: u32,

    /// Gaussian blur kernel size (odd).
    pub blur_size: u32,

    /// Peak overlay opacity in (0, 1].
    pub alpha_max: f32,

    /// Colormap name ("hot", "jet", "inferno", "plasma", "viridis").
    pub colormap: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "heatrail=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detection: DetectionDefaults::default(),
            heatmap: HeatmapDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DetectionDefaults {
    fn default() -> Self {
        Self {
            threshold: 15,
            min_area: 3,
            max_area: 500,
        }
    }
}

impl Default for HeatmapDefaults {
    fn default() -> Self {
        Self {
            resolution: 100,
            blur_size: 15,
            alpha_max: 0.7,
            colormap: "hot".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("heatrail").join("config.json")
}
