//! Download error types.

use crate::fetch::FetchError;
use thiserror::Error;

/// Errors that abort a tile download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Fetching one tile failed
    #[error("tile ({column}, {row}) failed: {source}")]
    Tile {
        column: u32,
        row: u32,
        #[source]
        source: FetchError,
    },

    /// A download worker panicked or was aborted
    #[error("download worker failed: {0}")]
    Worker(String),
}

impl DownloadError {
    /// Returns true if the download stopped because it was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            DownloadError::Tile {
                source: FetchError::Cancelled,
                ..
            }
        )
    }

    /// Returns the grid coordinate of the failing tile, if any.
    pub fn tile(&self) -> Option<(u32, u32)> {
        match self {
            DownloadError::Tile { column, row, .. } => Some((*column, *row)),
            DownloadError::Worker(_) => None,
        }
    }
}
