//! Pipeline stages and stage reporting.

use std::fmt;
use std::sync::Arc;

/// Linear stages of a stitching run.
///
/// A run moves `Planned -> Fetching -> Composing -> Trimmed -> Encoded`.
/// A failure carries the stage it happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineStage {
    /// Tile plan built
    Planned,
    /// Tiles are being downloaded
    Fetching,
    /// Tiles are being decoded and pasted
    Composing,
    /// Padding removed
    Trimmed,
    /// Final image encoded
    Encoded,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Planned => "planned",
            PipelineStage::Fetching => "fetching",
            PipelineStage::Composing => "composing",
            PipelineStage::Trimmed => "trimmed",
            PipelineStage::Encoded => "encoded",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked each time the pipeline enters a stage.
pub type StageCallback = Arc<dyn Fn(PipelineStage) + Send + Sync>;
