//! # imgocc Core
//!
//! Core types, events, and errors shared by the imgocc crates.
//! Provides the geometry of occlusion masks and selection boxes, the
//! canvas event dispatcher, and the shared-state aliases used by hosts.

pub mod constants;
pub mod error;
pub mod event;
pub mod geometry;
pub mod types;

pub use error::{OverlayError, Result};
pub use event::{CanvasEvent, EventDispatcher};
pub use geometry::{Bounds, ElementId, MaskRect, Point, SelectionBox};
pub use types::{thread_safe, ThreadSafe};
