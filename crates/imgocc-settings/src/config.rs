//! Configuration management for imgocc
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Mask style (fill, stroke colour, stroke width)
//! - OCR merging (confidence cut-off, overlap threshold)
//! - History (undo depth)
//! - Canvas (visible size, fit padding, id prefix)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Style applied to newly created masks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Fill colour of a mask
    pub fill: String,
    /// Stroke colour of a mask
    pub stroke: String,
    /// Stroke width in canvas units
    pub stroke_width: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            fill: "#FFEBA2".to_string(),
            stroke: "#2D2D2D".to_string(),
            stroke_width: 3.0,
        }
    }
}

/// OCR detection post-processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Detections at or below this confidence are dropped
    pub min_confidence: f64,
    /// Fraction of the smaller box that must be covered for two boxes to merge
    pub overlap_threshold: f64,
    /// Batch size handed to the text detector
    pub batch_size: usize,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            min_confidence: 0.60,
            overlap_threshold: 0.1,
            batch_size: 16,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable entries kept
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Canvas defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Visible canvas width in pixels
    pub width: f64,
    /// Visible canvas height in pixels
    pub height: f64,
    /// Fraction of the canvas kept free on each edge by "fit image to canvas"
    pub fit_padding: f64,
    /// Prefix of rendered element ids
    pub id_prefix: String,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            fit_padding: 0.05,
            id_prefix: "svg_".to_string(),
        }
    }
}

/// Complete overlay configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub style: StyleSettings,
    pub ocr: OcrSettings,
    pub history: HistorySettings,
    pub canvas: CanvasSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the config file.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(dir.join("imgocc").join("config.toml"))
    }

    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        let write_err = |source: std::io::Error| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.style.fill.trim().is_empty() {
            return Err(ConfigError::MissingValue("style.fill".to_string()));
        }
        if self.style.stroke.trim().is_empty() {
            return Err(ConfigError::MissingValue("style.stroke".to_string()));
        }
        if !(self.style.stroke_width.is_finite() && self.style.stroke_width > 0.0) {
            return Err(out_of_range("style.stroke_width", self.style.stroke_width));
        }

        if !(0.0..=1.0).contains(&self.ocr.min_confidence) {
            return Err(out_of_range("ocr.min_confidence", self.ocr.min_confidence));
        }
        if !(0.0..=1.0).contains(&self.ocr.overlap_threshold) {
            return Err(out_of_range(
                "ocr.overlap_threshold",
                self.ocr.overlap_threshold,
            ));
        }
        if self.ocr.batch_size == 0 {
            return Err(out_of_range("ocr.batch_size", self.ocr.batch_size));
        }

        if self.history.max_depth == 0 {
            return Err(out_of_range("history.max_depth", self.history.max_depth));
        }

        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.canvas.width) || !size_ok(self.canvas.height) {
            return Err(out_of_range(
                "canvas.size",
                format!("{}x{}", self.canvas.width, self.canvas.height),
            ));
        }
        if !(0.0..0.5).contains(&self.canvas.fit_padding) {
            return Err(out_of_range("canvas.fit_padding", self.canvas.fit_padding));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}
