//! The latest rectangle delivery from the OCR source.

use imgocc_core::MaskRect;

/// Holds the most recent rectangle delivery.
///
/// Each delivery replaces the previous one wholesale. "Never delivered" and
/// "delivered empty" are kept apart so callers can tell a pending OCR run
/// from one that found nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectangleStore {
    rects: Option<Vec<MaskRect>>,
}

impl RectangleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored rectangles, including with an empty delivery.
    pub fn replace(&mut self, rects: Vec<MaskRect>) {
        self.rects = Some(rects);
    }

    /// The stored rectangles, or `None` if nothing was delivered yet.
    pub fn get(&self) -> Option<&[MaskRect]> {
        self.rects.as_deref()
    }

    pub fn is_delivered(&self) -> bool {
        self.rects.is_some()
    }

    /// True when nothing was delivered or the delivery was empty.
    pub fn is_empty(&self) -> bool {
        self.rects.as_ref().is_none_or(|r| r.is_empty())
    }

    pub fn len(&self) -> usize {
        self.rects.as_ref().map_or(0, |r| r.len())
    }
}
