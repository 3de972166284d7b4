//! # imgocc Overlay
//!
//! Draws occlusion masks over an image canvas from rectangles supplied by an
//! OCR process, and records each drawing action as one undoable entry.
//!
//! ## Core Components
//!
//! - **Rectangle Store**: the latest rectangle delivery from the OCR source
//! - **Mask Drawer**: turns rectangles into canvas elements styled from the
//!   canvas' current style
//! - **Selective Mask Drawer**: draws only the stored rectangles that strictly
//!   intersect a selection box
//! - **Undo Batcher**: groups freshly created elements into a single history
//!   entry
//!
//! ## Architecture
//!
//! ```text
//! OCR source ──► RectangleStore ──► OverlayManager ──► CanvasHost   (document, ids, style)
//!                                        │
//!                                        └──────────► HistorySink  (undo/redo stack)
//! ```
//!
//! `CanvasHost` and `HistorySink` are the seams to the editor. `MaskCanvas`
//! and `UndoRedoManager` are in-memory implementations of both.
//!
//! ## Usage
//!
//! ```rust
//! use imgocc_core::{MaskRect, SelectionBox};
//! use imgocc_overlay::{MaskCanvas, OverlayManager, UndoRedoManager};
//!
//! let mut manager = OverlayManager::new(MaskCanvas::new(), UndoRedoManager::new(50));
//! manager.store_results(vec![
//!     MaskRect::new(10.0, 10.0, 20.0, 20.0),
//!     MaskRect::new(200.0, 200.0, 10.0, 10.0),
//! ]);
//!
//! let created = manager.draw_in_selection(&SelectionBox::new(0.0, 0.0, 100.0, 100.0));
//! assert_eq!(created, 1);
//! assert_eq!(manager.canvas().element_count(), 1);
//! ```

pub mod canvas;
pub mod commands;
pub mod history;
pub mod ocr;
pub mod overlay;
pub mod selection;
pub mod viewport;

pub use canvas::{CanvasHost, ElementKind, MaskCanvas, MaskElement, StyleContext};
pub use commands::{BatchCommand, InsertElement};
pub use history::{HistorySink, UndoRedoManager};
pub use ocr::{Detection, OcrError, OcrWorker, ReadySignal, TextDetector};
pub use overlay::{AutoCover, OverlayManager, RectangleStore};
pub use viewport::Viewport;
