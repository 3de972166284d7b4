//! Geometry of occlusion masks.
//!
//! Canvas coordinates are SVG user units: origin at the top-left of the
//! image, +X to the right, +Y down.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_ID_PREFIX;

/// Opaque handle of an element created on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DEFAULT_ID_PREFIX, self.0)
    }
}

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle descriptor as delivered by the OCR source.
///
/// Field names match the delivery format `{"x": .., "y": .., "w": .., "h": ..}`.
/// Nothing is validated: negative or non-finite geometry is carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaskRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl MaskRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Edge coordinates of the rectangle.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

impl From<Bounds> for MaskRect {
    fn from(b: Bounds) -> Self {
        Self::new(b.min_x, b.min_y, b.width(), b.height())
    }
}

/// A rubber-band selection supplied by the caller for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Returns true if `rect` overlaps this selection by a positive area.
    ///
    /// Intervals are open on both axes: a rectangle that only shares an
    /// edge or a corner with the selection is not selected.
    pub fn intersects(&self, rect: &MaskRect) -> bool {
        self.bounds().overlaps_strict(&rect.bounds())
    }
}

/// Axis-aligned box given by its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Open-interval overlap test on both axes.
    pub fn overlaps_strict(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Area shared by both boxes, zero when they are disjoint.
    pub fn intersection_area(&self, other: &Bounds) -> f64 {
        let w = (self.max_x.min(other.max_x) - self.min_x.max(other.min_x)).max(0.0);
        let h = (self.max_y.min(other.max_y) - self.min_y.max(other.min_y)).max(0.0);
        w * h
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}
