//! Tile grid planning.

use super::{GridError, TileDescriptor, TilePlan, ZoomLevel};
use crate::provider::TileSource;
use tracing::debug;

/// Plans the ordered tile list for a panorama.
///
/// Planning is pure: the same panorama id and zoom always produce the same
/// descriptors in the same order (column-major, see
/// [`GridDimensions::cells`](super::GridDimensions::cells)).
///
/// # Example
///
/// ```
/// use panostitch::grid::GridPlanner;
/// use panostitch::provider::StreetViewTileSource;
///
/// let planner = GridPlanner::new(StreetViewTileSource::default());
/// let plan = planner.plan("ABC", 2).unwrap();
/// assert_eq!(plan.len(), 8);
/// assert_eq!(
///     plan.tiles()[1].url,
///     "https://cbk0.google.com/cbk?output=tile&panoid=ABC&zoom=2&x=0&y=1"
/// );
/// ```
pub struct GridPlanner<S: TileSource> {
    source: S,
}

impl<S: TileSource> GridPlanner<S> {
    /// Creates a planner building URLs from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the tile source used for URLs.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Plans every tile of `panorama_id` at `zoom`.
    ///
    /// # Errors
    ///
    /// - [`GridError::EmptyPanoramaId`] if the id is blank
    /// - [`GridError::InvalidZoom`] if `zoom` is 0
    /// - [`GridError::UnsupportedZoom`] if the source does not serve `zoom`
    pub fn plan(&self, panorama_id: &str, zoom: u8) -> Result<TilePlan, GridError> {
        let panorama_id = panorama_id.trim();
        if panorama_id.is_empty() {
            return Err(GridError::EmptyPanoramaId);
        }

        let zoom = ZoomLevel::new(zoom)?;
        if !self.source.supports_zoom(zoom.value()) {
            return Err(GridError::UnsupportedZoom {
                zoom: zoom.value(),
                source_name: self.source.name().to_string(),
                max: self.source.max_zoom(),
            });
        }

        let dims = zoom.dimensions();
        let tiles: Vec<TileDescriptor> = dims
            .cells()
            .map(|(column, row)| TileDescriptor {
                column,
                row,
                url: self
                    .source
                    .tile_url(panorama_id, zoom.value(), column, row),
            })
            .collect();

        debug!(
            panorama_id = panorama_id,
            zoom = zoom.value(),
            grid = %dims,
            tiles = tiles.len(),
            "Planned tile grid"
        );

        Ok(TilePlan::new(panorama_id.to_string(), zoom, tiles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StreetViewTileSource;
    use std::collections::HashSet;

    fn planner() -> GridPlanner<StreetViewTileSource> {
        GridPlanner::new(StreetViewTileSource::default())
    }

    #[test]
    fn test_plan_counts_for_all_zooms() {
        let planner = planner();

        for zoom in 1..=5u8 {
            let plan = planner.plan("ABC", zoom).unwrap();
            let width = 1u32 << zoom;
            let height = 1u32 << (zoom - 1);

            assert_eq!(plan.len(), (width * height) as usize);

            let cells: HashSet<_> = plan.tiles().iter().map(|t| (t.column, t.row)).collect();
            assert_eq!(cells.len(), plan.len());
            assert!(plan
                .tiles()
                .iter()
                .all(|t| t.column < width && t.row < height));
        }
    }

    #[test]
    fn test_plan_abc_zoom_2() {
        let plan = planner().plan("ABC", 2).unwrap();
        let dims = plan.dimensions();

        assert_eq!((dims.width, dims.height), (4, 2));
        assert_eq!(plan.len(), 8);
        assert_eq!(plan.panorama_id(), "ABC");

        let mut expected = Vec::new();
        for x in 0..4 {
            for y in 0..2 {
                expected.push(format!(
                    "https://cbk0.google.com/cbk?output=tile&panoid=ABC&zoom=2&x={}&y={}",
                    x, y
                ));
            }
        }
        let urls: Vec<_> = plan.tiles().iter().map(|t| t.url.clone()).collect();
        assert_eq!(urls, expected);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let planner = planner();
        assert_eq!(planner.plan("XYZ", 3).unwrap(), planner.plan("XYZ", 3).unwrap());
    }

    #[test]
    fn test_plan_rejects_zoom_zero() {
        assert_eq!(
            planner().plan("ABC", 0).unwrap_err(),
            GridError::InvalidZoom(0)
        );
    }

    #[test]
    fn test_plan_rejects_unsupported_zoom() {
        let err = planner().plan("ABC", 6).unwrap_err();
        assert!(matches!(
            err,
            GridError::UnsupportedZoom { zoom: 6, max: 5, .. }
        ));
    }

    #[test]
    fn test_plan_rejects_empty_id() {
        assert_eq!(
            planner().plan("  ", 2).unwrap_err(),
            GridError::EmptyPanoramaId
        );
    }

    #[test]
    fn test_plan_trims_id() {
        let plan = planner().plan(" ABC ", 1).unwrap();
        assert_eq!(plan.panorama_id(), "ABC");
        assert!(plan.tiles()[0].url.contains("panoid=ABC&"));
    }
}
