//! Zoom and pan of the image canvas.
//!
//! Screen pixels and image coordinates share a top-left origin with +Y
//! pointing down, so `pixel = image * zoom + pan` on both axes.

use std::fmt;

use imgocc_core::Point;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 50.0;
const ZOOM_STEP: f64 = 1.2;

/// Visible area of the canvas widget and how the image is mapped into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Point,
    size: (f64, f64),
}

impl Viewport {
    /// Viewport of `width` x `height` pixels at 100% with no pan.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan: Point::new(0.0, 0.0),
            size: (width, height),
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.size.0
    }

    pub fn canvas_height(&self) -> f64 {
        self.size.1
    }

    /// Called when the widget is resized.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = (width, height);
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Requests outside the open range 0.1..50 are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan.x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan.y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = Point::new(x, y);
    }

    /// Maps a widget pixel to image coordinates.
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        Point::new(
            (pixel_x - self.pan.x) / self.zoom,
            (pixel_y - self.pan.y) / self.zoom,
        )
    }

    /// Maps image coordinates to a widget pixel.
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        (
            world_x * self.zoom + self.pan.x,
            world_y * self.zoom + self.pan.y,
        )
    }

    /// Shows all of a `width` x `height` image, centered.
    ///
    /// `padding` is the fraction of the widget left free on each side.
    /// An empty image leaves the viewport unchanged.
    pub fn fit_to_canvas(&mut self, width: f64, height: f64, padding: f64) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let usable = 1.0 - 2.0 * padding;
        let zoom = (self.size.0 * usable / width)
            .min(self.size.1 * usable / height)
            .clamp(MIN_ZOOM, MAX_ZOOM);

        self.zoom = zoom;
        self.pan = Point::new(
            (self.size.0 - width * zoom) / 2.0,
            (self.size.1 - height * zoom) / 2.0,
        );
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::new(0.0, 0.0);
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}% at ({:.1}, {:.1})",
            self.zoom * 100.0,
            self.pan.x,
            self.pan.y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
