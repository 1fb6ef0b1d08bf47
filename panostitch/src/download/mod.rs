//! Tile download stage.
//!
//! Drives a [`TilePlan`](crate::grid::TilePlan) through a
//! [`TileFetcher`](crate::fetch::TileFetcher) and gathers every tile before
//! anything is composed. The first failed fetch aborts the whole download.
//!
//! # Concurrency
//!
//! Downloads run strictly one at a time by default. With
//! [`TileDownloader::with_concurrency`] a bounded pool of workers pulls from a
//! shared queue; every worker still waits on the same rate limiter, so the
//! request rate is unchanged. On the first error all pending and in-flight
//! work is cancelled.

mod downloader;
mod error;
mod progress;

pub use downloader::TileDownloader;
pub use error::DownloadError;
pub use progress::{DownloadPhase, DownloadProgress, DownloadProgressCallback};
