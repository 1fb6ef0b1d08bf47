//! Tile grid type definitions

use std::fmt;

/// Highest zoom any panorama source is expected to serve.
///
/// Keeps `2^zoom` comfortably inside `u32` pixel arithmetic.
pub const MAX_ZOOM: u8 = 16;

/// Validated zoom level (≥ 1).
///
/// At zoom `z` the panorama is `2^z` tiles wide and `2^(z-1)` tiles tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    /// Creates a zoom level, rejecting 0 (which would yield a zero-height grid).
    pub fn new(zoom: u8) -> Result<Self, GridError> {
        if zoom == 0 || zoom > MAX_ZOOM {
            return Err(GridError::InvalidZoom(zoom));
        }
        Ok(Self(zoom))
    }

    /// Returns the raw zoom value.
    #[inline]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the grid dimensions at this zoom.
    #[inline]
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions {
            width: 1 << self.0,
            height: 1 << (self.0 - 1),
        }
    }
}

impl TryFrom<u8> for ZoomLevel {
    type Error = GridError;

    fn try_from(zoom: u8) -> Result<Self, Self::Error> {
        Self::new(zoom)
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grid size in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    /// Number of tile columns
    pub width: u32,
    /// Number of tile rows
    pub height: u32,
}

impl GridDimensions {
    /// Total number of tiles in the grid.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Pixel size of a canvas holding every tile.
    ///
    /// Returns `None` if either edge does not fit in `u32`.
    #[inline]
    pub fn pixel_size(&self, tile_size: u32) -> Option<(u32, u32)> {
        Some((
            self.width.checked_mul(tile_size)?,
            self.height.checked_mul(tile_size)?,
        ))
    }

    /// Returns true if (column, row) lies inside the grid.
    #[inline]
    pub fn contains(&self, column: u32, row: u32) -> bool {
        column < self.width && row < self.height
    }

    /// Returns an iterator over every cell in column-major order.
    ///
    /// Column 0 rows 0..height first, then column 1, and so on.
    #[inline]
    pub fn cells(&self) -> GridCells {
        GridCells {
            dims: *self,
            current: 0,
        }
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Iterator over all (column, row) cells of a grid.
#[derive(Debug, Clone)]
pub struct GridCells {
    dims: GridDimensions,
    current: usize,
}

impl Iterator for GridCells {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.dims.tile_count() {
            return None;
        }

        let height = self.dims.height as usize;
        let column = (self.current / height) as u32;
        let row = (self.current % height) as u32;

        self.current += 1;
        Some((column, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dims.tile_count() - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridCells {}

/// One tile to fetch: its grid position and source URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileDescriptor {
    /// X position in the grid
    pub column: u32,
    /// Y position in the grid
    pub row: u32,
    /// URL the tile is served from
    pub url: String,
}

/// Raw bytes of one fetched tile, tagged with its grid position.
#[derive(Clone, PartialEq, Eq)]
pub struct TileData {
    /// X position in the grid
    pub column: u32,
    /// Y position in the grid
    pub row: u32,
    /// Encoded image bytes as served
    pub bytes: Vec<u8>,
}

impl TileData {
    /// Pairs a descriptor with its fetched payload.
    pub fn from_descriptor(descriptor: &TileDescriptor, bytes: Vec<u8>) -> Self {
        Self {
            column: descriptor.column,
            row: descriptor.row,
            bytes,
        }
    }
}

impl fmt::Debug for TileData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileData")
            .field("column", &self.column)
            .field("row", &self.row)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Ordered set of tiles making up one panorama at one zoom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePlan {
    panorama_id: String,
    zoom: ZoomLevel,
    tiles: Vec<TileDescriptor>,
}

impl TilePlan {
    pub(super) fn new(panorama_id: String, zoom: ZoomLevel, tiles: Vec<TileDescriptor>) -> Self {
        Self {
            panorama_id,
            zoom,
            tiles,
        }
    }

    /// Panorama this plan covers.
    pub fn panorama_id(&self) -> &str {
        &self.panorama_id
    }

    /// Zoom level of the plan.
    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    /// Grid dimensions of the plan.
    pub fn dimensions(&self) -> GridDimensions {
        self.zoom.dimensions()
    }

    /// Tiles in fetch order.
    pub fn tiles(&self) -> &[TileDescriptor] {
        &self.tiles
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if the plan has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Errors raised while planning a tile grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Zoom outside 1..=MAX_ZOOM
    #[error("invalid zoom level {0}: must be between 1 and {max}", max = MAX_ZOOM)]
    InvalidZoom(u8),

    /// Zoom valid in general but not served by the tile source
    #[error("zoom level {zoom} not supported by {source_name} (max {max})")]
    UnsupportedZoom {
        zoom: u8,
        source_name: String,
        max: u8,
    },

    /// No panorama id given
    #[error("panorama id must not be empty")]
    EmptyPanoramaId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_zoom_zero_rejected() {
        assert_eq!(ZoomLevel::new(0), Err(GridError::InvalidZoom(0)));
        assert!(ZoomLevel::try_from(MAX_ZOOM + 1).is_err());
    }

    #[test]
    fn test_dimensions_from_zoom() {
        let dims = ZoomLevel::new(1).unwrap().dimensions();
        assert_eq!((dims.width, dims.height), (2, 1));

        let dims = ZoomLevel::new(4).unwrap().dimensions();
        assert_eq!((dims.width, dims.height), (16, 8));
        assert_eq!(dims.tile_count(), 128);
        assert_eq!(dims.to_string(), "16x8");
    }

    #[test]
    fn test_pixel_size() {
        let dims = ZoomLevel::new(2).unwrap().dimensions();
        assert_eq!(dims.pixel_size(512), Some((2048, 1024)));
    }

    #[test]
    fn test_pixel_size_overflow() {
        let dims = ZoomLevel::new(5).unwrap().dimensions();
        assert_eq!(dims.pixel_size(1 << 28), None);
        assert!(dims.pixel_size(1 << 26).is_some());
    }

    #[test]
    fn test_cells_column_major() {
        let dims = ZoomLevel::new(2).unwrap().dimensions();
        let cells: Vec<_> = dims.cells().collect();

        assert_eq!(
            cells,
            vec![
                (0, 0),
                (0, 1),
                (1, 0),
                (1, 1),
                (2, 0),
                (2, 1),
                (3, 0),
                (3, 1)
            ]
        );
    }

    #[test]
    fn test_cells_cover_grid_once() {
        for zoom in 1..=6 {
            let dims = ZoomLevel::new(zoom).unwrap().dimensions();
            let cells: Vec<_> = dims.cells().collect();
            let unique: HashSet<_> = cells.iter().copied().collect();

            assert_eq!(cells.len(), dims.tile_count());
            assert_eq!(unique.len(), cells.len());
            assert!(cells.iter().all(|&(c, r)| dims.contains(c, r)));
        }
    }

    #[test]
    fn test_cells_size_hint() {
        let dims = ZoomLevel::new(3).unwrap().dimensions();
        let mut cells = dims.cells();
        assert_eq!(cells.len(), 32);
        cells.next();
        assert_eq!(cells.len(), 31);
    }

    #[test]
    fn test_tile_data_debug_hides_bytes() {
        let data = TileData {
            column: 1,
            row: 2,
            bytes: vec![0; 1000],
        };
        let debug = format!("{:?}", data);
        assert!(debug.contains("1000"));
        assert!(!debug.contains("0, 0, 0"));
    }
}
