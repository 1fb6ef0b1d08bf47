//! End-to-end stitching pipeline.
//!
//! [`PanoramaStitcher`] wires the planner, the rate-limited downloader and the
//! compositor together and drives one panorama through
//! `Planned -> Fetching -> Composing -> Trimmed -> Encoded`. A failure at any
//! point ends the run with a [`StitchError`] that names its stage.

mod error;
mod stage;
mod stitcher;

pub use error::StitchError;
pub use stage::{PipelineStage, StageCallback};
pub use stitcher::{PanoramaStitcher, StitchOutput};
