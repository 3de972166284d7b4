//! OCR source: turns text detections into mask rectangles.
//!
//! The text detector itself is an external engine behind [`TextDetector`].
//! This module filters its detections by confidence, merges overlapping
//! boxes into clusters and runs the whole job off the UI thread.

use std::path::{Path, PathBuf};

use imgocc_core::{Bounds, MaskRect, Point, ThreadSafe};
use imgocc_settings::OcrSettings;
use thiserror::Error;

/// One detected text region.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Corner points of the region, in any order.
    pub quad: [Point; 4],
    /// Detector confidence in 0.0..=1.0
    pub confidence: f64,
}

impl Detection {
    pub fn new(quad: [Point; 4], confidence: f64) -> Self {
        Self { quad, confidence }
    }

    /// Detection covering an axis-aligned box.
    pub fn from_box(min_x: f64, min_y: f64, max_x: f64, max_y: f64, confidence: f64) -> Self {
        Self::new(
            [
                Point::new(min_x, min_y),
                Point::new(max_x, min_y),
                Point::new(max_x, max_y),
                Point::new(min_x, max_y),
            ],
            confidence,
        )
    }

    pub fn bounds(&self) -> Bounds {
        let p = &self.quad;
        Bounds::new(
            p.iter().map(|p| p.x).fold(f64::INFINITY, f64::min),
            p.iter().map(|p| p.y).fold(f64::INFINITY, f64::min),
            p.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max),
            p.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max),
        )
    }
}

/// Errors raised while producing OCR rectangles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OcrError {
    #[error("No image path provided.")]
    NoImage,

    #[error("Text detector not initialized.")]
    NoDetector,

    #[error("Could not load image from path: {0}.")]
    ImageUnreadable(PathBuf),

    #[error("An error occurred during text recognition: {0}")]
    Detector(String),

    #[error("OCR worker stopped unexpectedly: {0}")]
    Worker(String),
}

/// An external text-detection engine.
pub trait TextDetector: Send {
    fn detect(&mut self, image: &Path, batch_size: usize) -> Result<Vec<Detection>, OcrError>;
}

/// The OCR source side of the startup handshake.
pub trait ReadySignal {
    /// Called once when the canvas is ready to receive rectangles.
    fn notify_ready(&mut self);
}

/// True if the boxes share more than `threshold` of the smaller box's area.
fn boxes_overlap(a: &Bounds, b: &Bounds, threshold: f64) -> bool {
    let inter = a.intersection_area(b);
    if inter == 0.0 {
        return false;
    }
    let smaller = a.area().min(b.area());
    if smaller == 0.0 {
        return true;
    }
    inter / smaller > threshold
}

/// Filters detections by confidence and merges overlapping ones.
///
/// Clusters grow greedily from the first unmerged box: any remaining box
/// that overlaps the cluster is absorbed, the cluster becomes the union of
/// both, and the scan starts over. Coordinates are truncated to integers.
pub fn merge_detections(detections: &[Detection], settings: &OcrSettings) -> Vec<MaskRect> {
    let mut pending: Vec<Bounds> = detections
        .iter()
        .filter(|d| d.confidence > settings.min_confidence)
        .map(Detection::bounds)
        .collect();

    let mut merged = Vec::new();
    while !pending.is_empty() {
        let mut cluster = pending.remove(0);
        let mut i = 0;
        while i < pending.len() {
            if boxes_overlap(&cluster, &pending[i], settings.overlap_threshold) {
                cluster = cluster.union(&pending.remove(i));
                i = 0;
            } else {
                i += 1;
            }
        }
        merged.push(cluster);
    }

    merged
        .into_iter()
        .map(|b| {
            MaskRect::new(
                b.min_x.trunc(),
                b.min_y.trunc(),
                b.width().trunc(),
                b.height().trunc(),
            )
        })
        .collect()
}

/// Runs text detection and merging for one image.
pub struct OcrWorker<D> {
    image_path: PathBuf,
    detector: Option<ThreadSafe<D>>,
    settings: OcrSettings,
}

impl<D: TextDetector + 'static> OcrWorker<D> {
    pub fn new(
        image_path: impl Into<PathBuf>,
        detector: Option<ThreadSafe<D>>,
        settings: OcrSettings,
    ) -> Self {
        Self {
            image_path: image_path.into(),
            detector,
            settings,
        }
    }

    /// Runs detection on the calling thread.
    pub fn run(&self) -> Result<Vec<MaskRect>, OcrError> {
        if self.image_path.as_os_str().is_empty() {
            return Err(OcrError::NoImage);
        }
        let detector = self.detector.as_ref().ok_or(OcrError::NoDetector)?;
        if !self.image_path.is_file() {
            return Err(OcrError::ImageUnreadable(self.image_path.clone()));
        }

        let detections = detector
            .lock()
            .detect(&self.image_path, self.settings.batch_size)?;
        tracing::debug!(
            "Detector returned {} region(s) for {}",
            detections.len(),
            self.image_path.display()
        );
        Ok(merge_detections(&detections, &self.settings))
    }

    /// Runs detection on the blocking thread pool.
    pub async fn spawn(self) -> Result<Vec<MaskRect>, OcrError> {
        tokio::task::spawn_blocking(move || self.run())
            .await
            .map_err(|e| OcrError::Worker(e.to_string()))?
    }
}
