//! Canvas type definitions: ElementKind, MaskElement, StyleContext.

use imgocc_core::{ElementId, MaskRect};
use imgocc_settings::StyleSettings;
use serde::{Deserialize, Serialize};

/// Kind of SVG element the canvas creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rect,
}

impl ElementKind {
    /// SVG tag name.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Rect => "rect",
        }
    }
}

/// Current drawing style of the canvas.
///
/// Read at call time by the drawers; masks do not carry per-rectangle style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleContext {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::from(&StyleSettings::default())
    }
}

impl From<&StyleSettings> for StyleContext {
    fn from(settings: &StyleSettings) -> Self {
        Self {
            fill: settings.fill.clone(),
            stroke: settings.stroke.clone(),
            stroke_width: settings.stroke_width,
        }
    }
}

/// An element of the canvas document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub rect: MaskRect,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl MaskElement {
    /// Creates a rectangle element styled with `style`.
    pub fn rect(id: ElementId, rect: MaskRect, style: &StyleContext) -> Self {
        Self {
            id,
            kind: ElementKind::Rect,
            rect,
            fill: style.fill.clone(),
            stroke: style.stroke.clone(),
            stroke_width: style.stroke_width,
        }
    }

    /// SVG attribute mapping of the element, with the id rendered using `id_prefix`.
    pub fn attributes(&self, id_prefix: &str) -> Vec<(&'static str, String)> {
        vec![
            ("id", format!("{}{}", id_prefix, self.id.0)),
            ("x", self.rect.x.to_string()),
            ("y", self.rect.y.to_string()),
            ("width", self.rect.w.to_string()),
            ("height", self.rect.h.to_string()),
            ("fill", self.fill.clone()),
            ("stroke", self.stroke.clone()),
            ("stroke-width", self.stroke_width.to_string()),
        ]
    }
}
