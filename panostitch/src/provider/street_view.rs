//! Street View panorama tile source.
//!
//! Panorama tiles are served from a single endpoint keyed by query parameters:
//!
//! `https://{host}/{endpoint}?output=tile&panoid={id}&zoom={z}&x={col}&y={row}`
//!
//! At zoom `z` the equirectangular panorama is split into `2^z` columns and
//! `2^(z-1)` rows of 512×512 tiles. The highest zoom served is 5.

use super::TileSource;

/// Default tile host.
pub const DEFAULT_HOST: &str = "cbk0.google.com";

/// Default tile endpoint path.
pub const DEFAULT_ENDPOINT: &str = "cbk";

/// Street View tile source.
///
/// # Example
///
/// ```
/// use panostitch::provider::{StreetViewTileSource, TileSource};
///
/// let source = StreetViewTileSource::default();
/// assert_eq!(
///     source.tile_url("ABC", 2, 3, 1),
///     "https://cbk0.google.com/cbk?output=tile&panoid=ABC&zoom=2&x=3&y=1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetViewTileSource {
    host: String,
    endpoint: String,
}

impl StreetViewTileSource {
    /// Creates a tile source for a specific host and endpoint.
    pub fn new(host: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            endpoint: endpoint.into().trim_start_matches('/').to_string(),
        }
    }

    /// Returns the configured host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the configured endpoint path.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for StreetViewTileSource {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_ENDPOINT)
    }
}

impl TileSource for StreetViewTileSource {
    fn tile_url(&self, panorama_id: &str, zoom: u8, column: u32, row: u32) -> String {
        format!(
            "https://{}/{}?output=tile&panoid={}&zoom={}&x={}&y={}",
            self.host, self.endpoint, panorama_id, zoom, column, row
        )
    }

    fn name(&self) -> &str {
        "Street View"
    }

    fn min_zoom(&self) -> u8 {
        1
    }

    fn max_zoom(&self) -> u8 {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_format() {
        let source = StreetViewTileSource::default();
        let url = source.tile_url("KGt-9AaQ7UTn_PgwRqtTOg", 4, 15, 7);
        assert_eq!(
            url,
            "https://cbk0.google.com/cbk?output=tile&panoid=KGt-9AaQ7UTn_PgwRqtTOg&zoom=4&x=15&y=7"
        );
    }

    #[test]
    fn test_url_is_pure() {
        let source = StreetViewTileSource::default();
        assert_eq!(
            source.tile_url("ABC", 2, 1, 1),
            source.tile_url("ABC", 2, 1, 1)
        );
    }

    #[test]
    fn test_each_field_changes_url() {
        let source = StreetViewTileSource::default();
        let base = source.tile_url("ABC", 2, 1, 1);

        assert_ne!(base, source.tile_url("ABD", 2, 1, 1));
        assert_ne!(base, source.tile_url("ABC", 3, 1, 1));
        assert_ne!(base, source.tile_url("ABC", 2, 2, 1));
        assert_ne!(base, source.tile_url("ABC", 2, 1, 0));
    }

    #[test]
    fn test_custom_host_and_endpoint() {
        let source = StreetViewTileSource::new("localhost:8080", "/tiles");
        assert_eq!(source.endpoint(), "tiles");
        assert_eq!(
            source.tile_url("X", 1, 0, 0),
            "https://localhost:8080/tiles?output=tile&panoid=X&zoom=1&x=0&y=0"
        );
    }

    #[test]
    fn test_zoom_support() {
        let source = StreetViewTileSource::default();
        assert!(!source.supports_zoom(0));
        assert!(source.supports_zoom(1));
        assert!(source.supports_zoom(5));
        assert!(!source.supports_zoom(6));
    }
}
