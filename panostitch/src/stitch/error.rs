//! Stitch pipeline error types.

use super::PipelineStage;
use crate::compose::{ComposeError, ImagingError};
use crate::download::DownloadError;
use crate::grid::GridError;
use thiserror::Error;

/// A failed stitching run.
///
/// Each variant corresponds to the stage that failed; [`StitchError::stage`]
/// reports it.
#[derive(Debug, Error)]
pub enum StitchError {
    /// Building the tile plan failed
    #[error("planning failed: {0}")]
    Plan(#[from] GridError),

    /// Downloading tiles failed
    #[error("download failed: {0}")]
    Fetch(#[from] DownloadError),

    /// Assembling or trimming the canvas failed
    #[error("composition failed: {0}")]
    Compose(#[from] ComposeError),

    /// Encoding the final image failed
    #[error("encoding failed: {0}")]
    Encode(#[source] ImagingError),

    /// The run was cancelled between stages
    #[error("cancelled before {stage}")]
    Cancelled { stage: PipelineStage },

    /// A blocking worker panicked
    #[error("{stage} task failed: {message}")]
    Task {
        stage: PipelineStage,
        message: String,
    },
}

impl StitchError {
    /// The stage the pipeline was in when it failed.
    pub fn stage(&self) -> PipelineStage {
        match self {
            StitchError::Plan(_) => PipelineStage::Planned,
            StitchError::Fetch(_) => PipelineStage::Fetching,
            StitchError::Compose(ComposeError::EmptyImage { .. }) => PipelineStage::Trimmed,
            StitchError::Compose(_) => PipelineStage::Composing,
            StitchError::Encode(_) => PipelineStage::Encoded,
            StitchError::Cancelled { stage } | StitchError::Task { stage, .. } => *stage,
        }
    }

    /// Returns true if the run stopped because it was cancelled.
    pub fn is_cancelled(&self) -> bool {
        match self {
            StitchError::Fetch(e) => e.is_cancelled(),
            StitchError::Cancelled { .. } => true,
            _ => false,
        }
    }
}
