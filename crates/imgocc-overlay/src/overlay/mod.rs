//! Occlusion overlay manager.
//!
//! Receives rectangle deliveries, turns them into mask elements on the
//! canvas and records each drawing action as one history entry:
//! - `store`: the rectangle store
//! - `batcher`: grouping created elements into one undoable entry

mod batcher;
mod store;

pub use store::RectangleStore;

use imgocc_core::{ElementId, MaskRect, Result, SelectionBox};

use crate::canvas::{CanvasHost, MaskElement};
use crate::history::{HistorySink, UndoRedoManager};
use crate::ocr::{OcrError, ReadySignal};
use crate::selection::rects_in_selection;

/// History entry name for `draw_all`.
pub const DRAW_ALL_ACTION: &str = "Create All Occlusion Masks";
/// History entry name for `draw_in_selection`.
pub const DRAW_IN_SELECTION_ACTION: &str = "Create Occlusion Masks in Selection";
/// History entry name used when `finalize` is given no name.
pub const DEFAULT_ACTION: &str = "Create Occlusion Masks";

/// Result of the "Auto Cover" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoCover {
    /// OCR has not delivered yet
    Pending,
    /// OCR delivered no rectangles
    NothingDetected,
    /// This many masks were added
    Covered(usize),
}

impl std::fmt::Display for AutoCover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutoCover::Pending => write!(f, "Still processing image, please wait..."),
            AutoCover::NothingDetected => write!(f, "No text was detected in the image."),
            AutoCover::Covered(n) => write!(f, "Added {} occlusion masks.", n),
        }
    }
}

/// Draws OCR rectangles as occlusion masks with undo support.
#[derive(Debug)]
pub struct OverlayManager<C, H> {
    canvas: C,
    history: H,
    store: RectangleStore,
    started: bool,
}

impl<C: CanvasHost, H: HistorySink> OverlayManager<C, H> {
    pub fn new(canvas: C, history: H) -> Self {
        Self {
            canvas,
            history,
            store: RectangleStore::new(),
            started: false,
        }
    }

    /// Startup hook: tells the OCR source the canvas is ready to receive.
    ///
    /// Only the first call signals; later calls return `false`.
    pub fn start(&mut self, source: &mut dyn ReadySignal) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        source.notify_ready();
        tracing::debug!("Overlay ready, OCR source notified");
        true
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn store(&self) -> &RectangleStore {
        &self.store
    }

    /// Replaces the stored rectangles with a new delivery.
    pub fn store_results(&mut self, rects: Vec<MaskRect>) {
        tracing::debug!(
            "Storing {} OCR rectangle(s), replacing {}",
            rects.len(),
            self.store.len()
        );
        self.store.replace(rects);
    }

    /// Parses a JSON delivery (`[{"x":..,"y":..,"w":..,"h":..}, ...]`) and stores it.
    ///
    /// A malformed delivery leaves the store untouched.
    pub fn store_results_json(&mut self, json: &str) -> Result<usize> {
        let rects: Vec<MaskRect> = serde_json::from_str(json)?;
        let count = rects.len();
        self.store_results(rects);
        Ok(count)
    }

    /// Stores the outcome of an OCR run. A failed run counts as an empty delivery.
    pub fn accept_ocr_outcome(&mut self, outcome: std::result::Result<Vec<MaskRect>, OcrError>) {
        match outcome {
            Ok(rects) => {
                tracing::info!("OCR processing complete: {} region(s)", rects.len());
                self.store_results(rects);
            }
            Err(err) => {
                tracing::warn!("OCR error: {}", err);
                self.store_results(Vec::new());
            }
        }
    }

    /// Creates one mask per rectangle and records them as a single entry.
    ///
    /// Returns the number of masks created; empty input is a no-op.
    pub fn draw_all(&mut self, rects: &[MaskRect]) -> usize {
        if rects.is_empty() {
            return 0;
        }
        let created = self.create_masks(rects);
        self.finalize(&created, DRAW_ALL_ACTION);
        created.len()
    }

    /// Creates masks for the stored rectangles that strictly intersect `selection`.
    pub fn draw_in_selection(&mut self, selection: &SelectionBox) -> usize {
        let Some(stored) = self.store.get() else {
            return 0;
        };
        let selected = rects_in_selection(stored, selection);
        if selected.is_empty() {
            tracing::debug!("No stored rectangle intersects the selection");
            return 0;
        }
        let created = self.create_masks(&selected);
        self.finalize(&created, DRAW_IN_SELECTION_ACTION);
        created.len()
    }

    /// Covers every stored rectangle.
    pub fn auto_cover(&mut self) -> AutoCover {
        let outcome = match self.store.get() {
            None => AutoCover::Pending,
            Some([]) => AutoCover::NothingDetected,
            Some(stored) => {
                let stored = stored.to_vec();
                AutoCover::Covered(self.draw_all(&stored))
            }
        };
        tracing::info!("{}", outcome);
        outcome
    }

    /// Zooms the canvas so the whole image is visible.
    pub fn fit_image_to_canvas(&mut self, padding: f64) {
        self.canvas.fit_to_canvas(padding);
    }

    fn create_masks(&mut self, rects: &[MaskRect]) -> Vec<ElementId> {
        let style = self.canvas.style();
        rects
            .iter()
            .map(|rect| {
                let id = self.canvas.allocate_id();
                self.canvas
                    .create_element(MaskElement::rect(id, *rect, &style))
            })
            .collect()
    }
}

impl<C: CanvasHost> OverlayManager<C, UndoRedoManager> {
    /// Reverts the most recent drawing action.
    pub fn undo(&mut self) -> Result<Option<String>> {
        self.history.undo(&mut self.canvas)
    }

    /// Re-applies the most recently undone drawing action.
    pub fn redo(&mut self) -> Result<Option<String>> {
        self.history.redo(&mut self.canvas)
    }

    /// True when there is something to undo, i.e. closing would lose masks.
    pub fn has_unsaved_masks(&self) -> bool {
        self.history.can_undo()
    }
}
