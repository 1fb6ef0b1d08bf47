//! Panorama tile grid addressing.
//!
//! A panorama at zoom `z` is an equirectangular image split into
//! `2^z × 2^(z-1)` tiles. [`GridPlanner`] turns a panorama id and zoom into
//! the ordered list of tiles to fetch.

mod planner;
mod types;

pub use planner::GridPlanner;
pub use types::{
    GridCells, GridDimensions, GridError, TileData, TileDescriptor, TilePlan, ZoomLevel, MAX_ZOOM,
};
