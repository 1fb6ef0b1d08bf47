//! Plan command - print the tile URLs of a panorama without fetching.

use clap::Args;
use panostitch::grid::{GridPlanner, TilePlan};
use panostitch::provider::StreetViewTileSource;
use panostitch::stitch::StitchError;
use std::path::PathBuf;

use super::common::{load_config, resolve_panorama_id};
use crate::error::CliError;

/// Arguments for the plan command.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Panorama id (defaults to stitch.panorama_id from the config file)
    pub panorama_id: Option<String>,

    /// Zoom level
    #[arg(long, short)]
    pub zoom: Option<u8>,

    /// Config file to use instead of ~/.panostitch/config.ini
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the plan command.
pub fn run(args: PlanArgs) -> Result<(), CliError> {
    let file = load_config(args.config.as_deref())?;

    let panorama_id = resolve_panorama_id(args.panorama_id, &file);
    let zoom = args.zoom.unwrap_or(file.stitch.zoom);
    let source = StreetViewTileSource::new(&file.source.host, &file.source.endpoint);

    let plan = GridPlanner::new(source)
        .plan(&panorama_id, zoom)
        .map_err(StitchError::from)?;

    print!("{}", render_plan(&plan, file.source.tile_size));
    Ok(())
}

/// Render a plan as a header followed by one tab-separated line per tile.
fn render_plan(plan: &TilePlan, tile_size: u32) -> String {
    let dims = plan.dimensions();
    let canvas = match dims.pixel_size(tile_size) {
        Some((width, height)) => format!("{}x{}", width, height),
        None => "too large".to_string(),
    };

    let mut out = format!(
        "# panorama {} zoom {}: {} tiles ({}), canvas {}\n",
        plan.panorama_id(),
        plan.zoom(),
        plan.len(),
        dims,
        canvas
    );
    for tile in plan.tiles() {
        out.push_str(&format!("{}\t{}\t{}\n", tile.column, tile.row, tile.url));
    }
    out
}
