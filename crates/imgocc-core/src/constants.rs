//! Shared constants.

/// Prefix used when rendering element ids, matching the editor's `svg_<n>` scheme.
pub const DEFAULT_ID_PREFIX: &str = "svg_";

/// Capacity of the canvas event broadcast buffer.
pub const EVENT_BUFFER_SIZE: usize = 64;
