//! Panorama compositor implementation.

use super::{ComposeError, Imaging, ImagingError, OutputFormat, TrimBox, BLACK};
use crate::grid::{GridDimensions, TileData, ZoomLevel};
use tracing::{debug, instrument, warn};

/// Edge length of one panorama tile in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 512;

/// Largest tile edge accepted from configuration.
pub const MAX_TILE_SIZE: u32 = 4096;

/// Per-channel difference above which a pixel counts as content.
pub const DEFAULT_TRIM_THRESHOLD: u8 = 6;

/// Result of composing a panorama.
#[derive(Debug, Clone)]
pub struct Composition<Image> {
    /// Trimmed panorama
    pub image: Image,
    /// Crop applied to the assembled canvas
    pub trim: TrimBox,
    /// Size of the canvas before trimming
    pub canvas_size: (u32, u32),
}

/// Assembles tiles into a single trimmed panorama.
///
/// This stage:
/// 1. Allocates a canvas of `tile_size × grid` pixels filled with the background
/// 2. Decodes each tile and pastes it at `(tile_size × column, tile_size × row)`
/// 3. Finds the bounding box of everything that is not background
/// 4. Crops the canvas to that box
///
/// A canvas with no content at all fails with [`ComposeError::EmptyImage`].
///
/// # Example
///
/// ```ignore
/// use panostitch::compose::{PanoramaCompositor, RasterImaging};
///
/// let compositor = PanoramaCompositor::new(RasterImaging, 512);
/// let composition = compositor.compose(&tiles, plan.zoom())?;
/// ```
#[derive(Debug, Clone)]
pub struct PanoramaCompositor<I: Imaging> {
    imaging: I,
    tile_size: u32,
    trim_threshold: u8,
}

impl<I: Imaging> PanoramaCompositor<I> {
    /// Creates a compositor with the default trim threshold and black background.
    pub fn new(imaging: I, tile_size: u32) -> Self {
        Self {
            imaging,
            tile_size,
            trim_threshold: DEFAULT_TRIM_THRESHOLD,
        }
    }

    /// Sets the trim threshold.
    pub fn with_trim_threshold(mut self, threshold: u8) -> Self {
        self.trim_threshold = threshold;
        self
    }

    /// Returns the tile size in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Returns the trim threshold.
    pub fn trim_threshold(&self) -> u8 {
        self.trim_threshold
    }

    /// Returns the imaging backend.
    pub fn imaging(&self) -> &I {
        &self.imaging
    }

    /// Assembles and trims all tiles of a panorama at `zoom`.
    #[instrument(skip(self, tiles), fields(tiles = tiles.len()))]
    pub fn compose(
        &self,
        tiles: &[TileData],
        zoom: ZoomLevel,
    ) -> Result<Composition<I::Image>, ComposeError> {
        let canvas = self.assemble(tiles, zoom.dimensions())?;
        let canvas_size = self.imaging.dimensions(&canvas);
        let (image, trim) = self.trim(canvas)?;

        Ok(Composition {
            image,
            trim,
            canvas_size,
        })
    }

    /// Returns the canvas size for `dims`, or an error if it overflows.
    pub fn canvas_size(&self, dims: GridDimensions) -> Result<(u32, u32), ComposeError> {
        dims.pixel_size(self.tile_size)
            .ok_or(ComposeError::CanvasTooLarge {
                grid: dims,
                tile_size: self.tile_size,
            })
    }

    /// Pastes every tile onto a fresh canvas without trimming.
    pub fn assemble(
        &self,
        tiles: &[TileData],
        dims: GridDimensions,
    ) -> Result<I::Image, ComposeError> {
        let (canvas_width, canvas_height) = self.canvas_size(dims)?;
        let mut canvas = self.imaging.blank(canvas_width, canvas_height, BLACK);

        debug!(
            grid = %dims,
            canvas_width,
            canvas_height,
            "Allocated panorama canvas"
        );

        for tile in tiles {
            let x = u64::from(self.tile_size) * u64::from(tile.column);
            let y = u64::from(self.tile_size) * u64::from(tile.row);

            if !dims.contains(tile.column, tile.row) {
                return Err(ComposeError::OutOfBounds {
                    column: tile.column,
                    row: tile.row,
                    x,
                    y,
                    canvas_width,
                    canvas_height,
                });
            }

            let image = self
                .imaging
                .decode(&tile.bytes)
                .map_err(|source| ComposeError::Decode {
                    column: tile.column,
                    row: tile.row,
                    source,
                })?;

            let (tile_width, tile_height) = self.imaging.dimensions(&image);
            if tile_width != self.tile_size || tile_height != self.tile_size {
                warn!(
                    column = tile.column,
                    row = tile.row,
                    tile_width,
                    tile_height,
                    expected = self.tile_size,
                    "Tile size differs from configured tile size"
                );
            }

            // The cell is inside the grid, so both offsets fit in the canvas
            self.imaging
                .paste_opaque(&mut canvas, &image, x as u32, y as u32);
        }

        Ok(canvas)
    }

    /// Crops `canvas` to its content.
    ///
    /// Returns the cropped image and the box that was applied.
    pub fn trim(&self, canvas: I::Image) -> Result<(I::Image, TrimBox), ComposeError> {
        let (width, height) = self.imaging.dimensions(&canvas);
        let trim = self
            .imaging
            .find_content_bounds(&canvas, BLACK, self.trim_threshold)
            .ok_or(ComposeError::EmptyImage {
                threshold: self.trim_threshold,
            })?;

        debug!(
            %trim,
            canvas_width = width,
            canvas_height = height,
            "Trimming panorama padding"
        );

        Ok((self.imaging.crop(canvas, trim), trim))
    }

    /// Encodes a composed image.
    pub fn encode(&self, image: &I::Image, format: OutputFormat) -> Result<Vec<u8>, ImagingError> {
        self.imaging.encode(image, format)
    }
}
