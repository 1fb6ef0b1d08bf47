//! Progress reporting for tile downloads.
//!
//! Progress is observational only. It is reported through `tracing` and,
//! when set, a callback that can be wired to a terminal progress line.

use std::sync::Arc;

/// Progress callback for tile downloads.
pub type DownloadProgressCallback = Arc<dyn Fn(DownloadProgress) + Send + Sync>;

/// Where a tile is in its fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    /// Request about to be issued
    Fetching,
    /// Body received
    Done,
    /// Request failed or was cancelled; the download aborts
    Failed,
}

/// One progress notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Phase of this tile
    pub phase: DownloadPhase,
    /// Tile column
    pub column: u32,
    /// Tile row
    pub row: u32,
    /// 1-based position in the plan
    pub index: usize,
    /// Number of tiles in the plan
    pub total: usize,
}

impl DownloadProgress {
    /// Fraction of the plan finished once this tile is done.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        let done = match self.phase {
            DownloadPhase::Fetching | DownloadPhase::Failed => self.index - 1,
            DownloadPhase::Done => self.index,
        };
        done as f64 / self.total as f64
    }
}
