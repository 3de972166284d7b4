//! imgocc Settings Crate
//!
//! Handles overlay configuration: mask styling, OCR merge thresholds,
//! history depth and canvas defaults.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, HistorySettings, OcrSettings, StyleSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
