//! Selection-box filtering of stored rectangles.

use imgocc_core::{MaskRect, SelectionBox};

/// Rectangles that overlap `selection` by a positive area, in input order.
///
/// Edge or corner contact alone does not select a rectangle.
pub fn rects_in_selection(rects: &[MaskRect], selection: &SelectionBox) -> Vec<MaskRect> {
    rects
        .iter()
        .filter(|rect| selection.intersects(rect))
        .copied()
        .collect()
}
