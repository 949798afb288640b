//! Error types for canvas operations.

use thiserror::Error;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
///
/// None of these are fatal: the session logs them and keeps processing
/// events.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The surface has not been initialized yet.
    #[error("Surface not initialized")]
    UninitializedSurface,

    /// Surface dimensions are zero or exceed the pixel limit.
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Selected color is not one of the offered swatches.
    #[error("Color not in palette: {0}")]
    InvalidColorSelection(String),

    /// Swatch index is out of range.
    #[error("Swatch index {index} out of range (palette has {len})")]
    SwatchOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of swatches.
        len: usize,
    },

    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Snapshot encoding failed.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// Snapshot or data URL decoding failed.
    #[error("Decoding error: {0}")]
    Decode(String),
}
