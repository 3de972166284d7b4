//! Error handling for imgocc
//!
//! Drawing operations themselves never fail: empty input is a silent no-op
//! and geometry is passed through untouched. Errors only surface at the
//! seams where the document is replayed or a delivery is parsed.

use thiserror::Error;

use crate::geometry::ElementId;

/// Overlay error type
///
/// Represents failures of the canvas document or of an inbound delivery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// The sibling an element must be re-inserted before is not in the document
    #[error("Cannot insert {element}: anchor {anchor} is not in the document")]
    MissingAnchor {
        /// The element being inserted.
        element: ElementId,
        /// The next-sibling anchor that could not be found.
        anchor: ElementId,
    },

    /// An element with the same id is already part of the document
    #[error("Element {0} is already in the document")]
    DuplicateElement(ElementId),

    /// The element is not part of the document
    #[error("Element {0} not found")]
    UnknownElement(ElementId),

    /// A rectangle delivery could not be parsed
    #[error("Malformed rectangle delivery: {reason}")]
    MalformedDelivery {
        /// The parser's explanation.
        reason: String,
    },
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        OverlayError::MalformedDelivery {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;
