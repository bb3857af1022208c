//! Error types shared across Heatrail crates.

use std::path::PathBuf;

/// Top-level error type for Heatrail operations.
#[derive(Debug, thiserror::Error)]
pub enum HeatrailError {
    #[error("Frame source error: {message}")]
    Source { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HeatrailError.
pub type HeatrailResult<T> = Result<T, HeatrailError>;

impl HeatrailError {
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
