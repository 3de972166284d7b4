//! Command-line driver.
//!
//! `imgocc <delivery.json> [--select x,y,w,h] [--image WxH] [--config path]`
//!
//! Reads an OCR delivery, draws it onto an in-memory canvas (everything, or
//! only what a selection box touches) and reports the created masks. With
//! `--image` the view is also fitted to an image of that size.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use imgocc_core::SelectionBox;
use imgocc_overlay::{AutoCover, MaskCanvas, MaskElement, OverlayManager, UndoRedoManager};
use imgocc_settings::Config;
use serde::Serialize;

/// Draw occlusion masks from an OCR rectangle delivery.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "imgocc", author, version, about, long_about = None)]
pub struct CliArgs {
    /// JSON array of `{"x","y","w","h"}` rectangles
    pub delivery: PathBuf,

    /// Only cover rectangles overlapping this box, given as x,y,w,h
    #[arg(long = "select", value_name = "X,Y,W,H", value_parser = parse_selection)]
    pub selection: Option<SelectionBox>,

    /// Fit the view to an image of this size, given as WxH
    #[arg(long = "image", value_name = "WxH", value_parser = parse_image_size)]
    pub image_size: Option<(f64, f64)>,

    /// Settings file (.toml or .json); defaults to the platform config directory
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Loads the configuration named by `--config`, or the default one.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => Config::default_path()?,
        };
        Config::load_or_default(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))
    }
}

/// Parses `x,y,w,h` into a selection box.
pub fn parse_selection(value: &str) -> anyhow::Result<SelectionBox> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid selection '{}'", value))?;
    let [x, y, width, height] = parts[..] else {
        bail!("selection needs four values x,y,w,h, got '{}'", value);
    };
    Ok(SelectionBox::new(x, y, width, height))
}

/// Parses `WxH` into an image size.
pub fn parse_image_size(value: &str) -> anyhow::Result<(f64, f64)> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .with_context(|| format!("image size needs the form WxH, got '{}'", value))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .with_context(|| format!("invalid image size '{}'", value))
    };
    Ok((parse(w)?, parse(h)?))
}

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct CliReport {
    pub delivered: usize,
    pub created: usize,
    pub history: Option<String>,
    pub zoom: f64,
    pub masks: Vec<MaskElement>,
}

/// Applies the delivery at `args.delivery` using `config`.
pub fn run(args: &CliArgs, config: &Config) -> anyhow::Result<CliReport> {
    let json = read_delivery(&args.delivery)?;

    let mut canvas = MaskCanvas::from_settings(&config.canvas, &config.style);
    if let Some((width, height)) = args.image_size {
        canvas.set_image_size(width, height);
    }
    let history = UndoRedoManager::from_settings(&config.history);
    let mut manager = OverlayManager::new(canvas, history);

    manager.fit_image_to_canvas(config.canvas.fit_padding);

    let delivered = manager
        .store_results_json(&json)
        .with_context(|| format!("malformed delivery in {}", args.delivery.display()))?;

    let created = match &args.selection {
        Some(selection) => manager.draw_in_selection(selection),
        None => match manager.auto_cover() {
            AutoCover::Covered(n) => n,
            AutoCover::Pending | AutoCover::NothingDetected => 0,
        },
    };

    Ok(CliReport {
        delivered,
        created,
        history: manager.history().undo_name().map(str::to_string),
        zoom: manager.canvas().viewport().zoom(),
        masks: manager.canvas().elements().cloned().collect(),
    })
}

fn read_delivery(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read delivery {}", path.display()))
}
