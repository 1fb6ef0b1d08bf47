//! Panorama composition.
//!
//! Places fetched tiles on a blank canvas and crops away the uniform padding
//! the tile server adds around the panorama.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │     PanoramaCompositor       │  grid math, bounds checks, trim policy
//! └──────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │        Imaging trait         │  decode / paste / bounds / crop / encode
//! └──────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │  RasterImaging (image crate) │
//! └──────────────────────────────┘
//! ```

mod compositor;
mod error;
mod imaging;
mod raster;
mod trim;

pub use compositor::{
    Composition, PanoramaCompositor, DEFAULT_TILE_SIZE, DEFAULT_TRIM_THRESHOLD, MAX_TILE_SIZE,
};
pub use error::{ComposeError, ImagingError};
pub use imaging::{Color, Imaging, OutputFormat, BLACK, DEFAULT_JPEG_QUALITY};
pub use raster::RasterImaging;
pub use trim::{find_content_bounds, TrimBox};
