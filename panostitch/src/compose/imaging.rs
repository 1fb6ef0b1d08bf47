//! Imaging trait for abstracting pixel operations.
//!
//! The compositor only needs a handful of primitives. Keeping them behind a
//! trait lets the placement and trim logic run against an in-memory fake in
//! tests, and keeps the codec choice out of the algorithm.

use super::{ImagingError, TrimBox};
use std::path::Path;
use std::sync::Arc;

/// RGB colour.
pub type Color = [u8; 3];

/// Canvas background.
pub const BLACK: Color = [0, 0, 0];

/// Default JPEG quality (matches libvips' default `Q`).
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Baseline JPEG at the given quality (1-100)
    Jpeg { quality: u8 },
    /// Lossless PNG
    Png,
}

impl OutputFormat {
    /// Picks a format from a file extension (`.jpg`, `.jpeg`, `.png`).
    ///
    /// Returns `None` for any other extension.
    pub fn from_path(path: &Path, jpeg_quality: u8) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg {
                quality: jpeg_quality,
            }),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Pixel primitives used by the compositor.
///
/// Implementations must be thread-safe (`Send + Sync`) so composition can
/// move onto a blocking worker thread.
pub trait Imaging: Send + Sync {
    /// In-memory image type.
    type Image: Send + 'static;

    /// Allocates a `width × height` image filled with `background`.
    fn blank(&self, width: u32, height: u32, background: Color) -> Self::Image;

    /// Returns (width, height) in pixels.
    fn dimensions(&self, image: &Self::Image) -> (u32, u32);

    /// Decodes encoded bytes (JPEG, PNG, ...) into an image.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, ImagingError>;

    /// Copies `tile` onto `canvas` with its top-left at (x, y).
    ///
    /// Pixels are replaced without blending. Parts of `tile` that fall past
    /// the canvas edge are clipped.
    fn paste_opaque(&self, canvas: &mut Self::Image, tile: &Self::Image, x: u32, y: u32);

    /// Smallest box enclosing every pixel that differs from `background` by
    /// more than `threshold` on any channel, or `None` if there is none.
    fn find_content_bounds(
        &self,
        image: &Self::Image,
        background: Color,
        threshold: u8,
    ) -> Option<TrimBox>;

    /// Returns the sub-image covered by `region`.
    fn crop(&self, image: Self::Image, region: TrimBox) -> Self::Image;

    /// Serialises an image.
    fn encode(&self, image: &Self::Image, format: OutputFormat) -> Result<Vec<u8>, ImagingError>;
}

impl<T: Imaging + ?Sized> Imaging for Arc<T> {
    type Image = T::Image;

    fn blank(&self, width: u32, height: u32, background: Color) -> Self::Image {
        (**self).blank(width, height, background)
    }

    fn dimensions(&self, image: &Self::Image) -> (u32, u32) {
        (**self).dimensions(image)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, ImagingError> {
        (**self).decode(bytes)
    }

    fn paste_opaque(&self, canvas: &mut Self::Image, tile: &Self::Image, x: u32, y: u32) {
        (**self).paste_opaque(canvas, tile, x, y)
    }

    fn find_content_bounds(
        &self,
        image: &Self::Image,
        background: Color,
        threshold: u8,
    ) -> Option<TrimBox> {
        (**self).find_content_bounds(image, background, threshold)
    }

    fn crop(&self, image: Self::Image, region: TrimBox) -> Self::Image {
        (**self).crop(image, region)
    }

    fn encode(&self, image: &Self::Image, format: OutputFormat) -> Result<Vec<u8>, ImagingError> {
        (**self).encode(image, format)
    }
}
