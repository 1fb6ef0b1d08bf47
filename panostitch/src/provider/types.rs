//! Provider types and traits

use std::fmt;

/// Errors raised by the HTTP transport underneath a tile source.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Connection, request or body read failed
    HttpError(String),
    /// Server answered with a non-2xx status
    HttpStatus { status: u16, url: String },
    /// The HTTP client could not be constructed
    ClientSetup(String),
}

impl ProviderError {
    /// Returns the HTTP status code if the failure was a status response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::HttpStatus { status, url } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            ProviderError::ClientSetup(msg) => {
                write!(f, "Failed to create HTTP client: {}", msg)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// A tile source maps a panorama tile address to the URL it is served from.
///
/// Implementations must be pure: the same address always yields the same URL.
pub trait TileSource: Send + Sync {
    /// Builds the URL for one tile of a panorama.
    ///
    /// # Arguments
    ///
    /// * `panorama_id` - Opaque panorama identifier
    /// * `zoom` - Zoom level
    /// * `column` - Tile column (x)
    /// * `row` - Tile row (y)
    fn tile_url(&self, panorama_id: &str, zoom: u8, column: u32, row: u32) -> String;

    /// Returns the source's name for logging and identification.
    fn name(&self) -> &str;

    /// Returns the minimum supported zoom level.
    fn min_zoom(&self) -> u8;

    /// Returns the maximum supported zoom level.
    fn max_zoom(&self) -> u8;

    /// Checks if this source supports the given zoom level.
    fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }
}

impl<T: TileSource + ?Sized> TileSource for std::sync::Arc<T> {
    fn tile_url(&self, panorama_id: &str, zoom: u8, column: u32, row: u32) -> String {
        (**self).tile_url(panorama_id, zoom, column, row)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn min_zoom(&self) -> u8 {
        (**self).min_zoom()
    }

    fn max_zoom(&self) -> u8 {
        (**self).max_zoom()
    }
}
