//! Composition error types.

use crate::grid::GridDimensions;
use thiserror::Error;

/// Errors raised by an [`Imaging`](super::Imaging) backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImagingError {
    /// Bytes could not be decoded as an image
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Image could not be serialised
    #[error("image encode failed: {0}")]
    Encode(String),
}

/// Errors that abort composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A tile's bytes were not a valid image
    #[error("tile ({column}, {row}) could not be decoded: {source}")]
    Decode {
        column: u32,
        row: u32,
        #[source]
        source: ImagingError,
    },

    /// A tile would be pasted outside the canvas
    #[error(
        "tile ({column}, {row}) at pixel offset ({x}, {y}) is outside the {canvas_width}x{canvas_height} canvas"
    )]
    OutOfBounds {
        column: u32,
        row: u32,
        x: u64,
        y: u64,
        canvas_width: u32,
        canvas_height: u32,
    },

    /// The canvas for this grid and tile size does not fit in `u32` pixels
    #[error("a {grid} grid of {tile_size}px tiles is too large for one canvas")]
    CanvasTooLarge {
        grid: GridDimensions,
        tile_size: u32,
    },

    /// Nothing on the canvas differs from the background
    #[error("no content differs from the background by more than {threshold}")]
    EmptyImage { threshold: u8 },
}
