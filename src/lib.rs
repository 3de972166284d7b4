//! # imgocc
//!
//! Occlusion masks for image flashcards. An OCR pass delivers text
//! rectangles; the overlay turns them into mask elements on a canvas and
//! records every drawing action as one undoable history entry.
//!
//! ## Architecture
//!
//! imgocc is organized as a workspace with multiple crates:
//!
//! 1. **imgocc-core** - Geometry, element ids, events, errors
//! 2. **imgocc-settings** - Style, OCR, history and canvas configuration
//! 3. **imgocc-overlay** - Rectangle store, mask drawers, undo batching, OCR worker
//! 4. **imgocc** - Command-line driver that integrates all crates

pub mod cli;

pub use imgocc_core::{
    CanvasEvent, ElementId, EventDispatcher, MaskRect, OverlayError, Result, SelectionBox,
};

pub use imgocc_overlay::{
    AutoCover, BatchCommand, CanvasHost, Detection, HistorySink, InsertElement, MaskCanvas,
    MaskElement, OcrError, OcrWorker, OverlayManager, ReadySignal, RectangleStore, StyleContext,
    TextDetector, UndoRedoManager, Viewport,
};

pub use imgocc_settings::{Config, SettingsError};

pub use cli::{CliArgs, CliReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Builds the log filter from `RUST_LOG`-style directives.
///
/// Falls back to `info` when `directives` holds no valid directive.
pub fn log_filter(directives: &str) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::filter::LevelFilter;

    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let env_filter = log_filter(&directives);

    // stdout carries the JSON report
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
