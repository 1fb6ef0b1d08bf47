//! Tile downloader implementation.

use super::{DownloadError, DownloadPhase, DownloadProgress, DownloadProgressCallback};
use crate::fetch::TileFetcher;
use crate::grid::{TileData, TileDescriptor, TilePlan};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Downloads every tile of a plan, all-or-nothing.
///
/// # Example
///
/// ```ignore
/// use panostitch::download::TileDownloader;
///
/// let downloader = TileDownloader::new(Arc::new(fetcher));
/// let tiles = downloader.download_all(&plan, &cancel).await?;
/// assert_eq!(tiles.len(), plan.len());
/// ```
pub struct TileDownloader<F: TileFetcher> {
    fetcher: Arc<F>,
    concurrency: usize,
    progress: Option<DownloadProgressCallback>,
}

impl<F: TileFetcher + 'static> TileDownloader<F> {
    /// Creates a sequential downloader.
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            concurrency: 1,
            progress: None,
        }
    }

    /// Sets the number of workers. Values below 1 are treated as 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sets a progress callback.
    pub fn with_progress(mut self, callback: DownloadProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Returns the configured worker count.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Downloads every tile in `plan`.
    ///
    /// Returns the tiles in plan order. The first failure aborts the download
    /// and is returned with the coordinate of the failing tile; no partial
    /// result is ever returned.
    #[instrument(skip_all, fields(panorama_id = plan.panorama_id(), zoom = plan.zoom().value()))]
    pub async fn download_all(
        &self,
        plan: &TilePlan,
        cancel: &CancellationToken,
    ) -> Result<Vec<TileData>, DownloadError> {
        self.download_descriptors(plan.tiles(), cancel).await
    }

    /// Downloads an explicit descriptor list in order.
    pub async fn download_descriptors(
        &self,
        descriptors: &[TileDescriptor],
        cancel: &CancellationToken,
    ) -> Result<Vec<TileData>, DownloadError> {
        if self.concurrency <= 1 || descriptors.len() <= 1 {
            self.download_sequential(descriptors, cancel).await
        } else {
            self.download_concurrent(descriptors, cancel).await
        }
    }

    async fn download_sequential(
        &self,
        descriptors: &[TileDescriptor],
        cancel: &CancellationToken,
    ) -> Result<Vec<TileData>, DownloadError> {
        let total = descriptors.len();
        let mut results = Vec::with_capacity(total);

        for (i, descriptor) in descriptors.iter().enumerate() {
            let bytes = fetch_one(
                self.fetcher.as_ref(),
                descriptor,
                i + 1,
                total,
                self.progress.as_ref(),
                cancel,
            )
            .await?;
            results.push(TileData::from_descriptor(descriptor, bytes));
        }

        Ok(results)
    }

    async fn download_concurrent(
        &self,
        descriptors: &[TileDescriptor],
        cancel: &CancellationToken,
    ) -> Result<Vec<TileData>, DownloadError> {
        let total = descriptors.len();
        let queue: Arc<Mutex<VecDeque<(usize, TileDescriptor)>>> = Arc::new(Mutex::new(
            descriptors.iter().cloned().enumerate().collect(),
        ));
        // Cancelling this stops sibling workers without touching the caller's token
        let abort = cancel.child_token();
        let mut workers = JoinSet::new();

        for _ in 0..self.concurrency.min(total) {
            let queue = Arc::clone(&queue);
            let fetcher = Arc::clone(&self.fetcher);
            let progress = self.progress.clone();
            let abort = abort.clone();

            workers.spawn(async move {
                let mut fetched = Vec::new();
                loop {
                    let next = queue.lock().pop_front();
                    let Some((index, descriptor)) = next else {
                        return Ok(fetched);
                    };

                    match fetch_one(
                        fetcher.as_ref(),
                        &descriptor,
                        index + 1,
                        total,
                        progress.as_ref(),
                        &abort,
                    )
                    .await
                    {
                        Ok(bytes) => {
                            fetched.push((index, TileData::from_descriptor(&descriptor, bytes)))
                        }
                        Err(e) => {
                            abort.cancel();
                            return Err(e);
                        }
                    }
                }
            });
        }

        let mut results = Vec::with_capacity(total);
        let mut first_error: Option<DownloadError> = None;

        while let Some(joined) = workers.join_next().await {
            let outcome = joined.unwrap_or_else(|e| Err(DownloadError::Worker(e.to_string())));
            match outcome {
                Ok(fetched) => results.extend(fetched),
                Err(e) => {
                    abort.cancel();
                    // Keep the root cause over the cancellations it triggered
                    let replace = match &first_error {
                        None => true,
                        Some(current) => current.is_cancelled() && !e.is_cancelled(),
                    };
                    if replace {
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        results.sort_by_key(|(index, _)| *index);
        Ok(results.into_iter().map(|(_, tile)| tile).collect())
    }
}

/// Fetches one tile with progress reporting on either side of the request.
async fn fetch_one<F: TileFetcher + ?Sized>(
    fetcher: &F,
    descriptor: &TileDescriptor,
    index: usize,
    total: usize,
    progress: Option<&DownloadProgressCallback>,
    cancel: &CancellationToken,
) -> Result<Vec<u8>, DownloadError> {
    let report = |phase| {
        if let Some(callback) = progress {
            callback(DownloadProgress {
                phase,
                column: descriptor.column,
                row: descriptor.row,
                index,
                total,
            });
        }
    };

    info!(
        column = descriptor.column,
        row = descriptor.row,
        index,
        total,
        "Fetching tile"
    );
    report(DownloadPhase::Fetching);

    match fetcher.fetch(&descriptor.url, cancel).await {
        Ok(bytes) => {
            info!(
                column = descriptor.column,
                row = descriptor.row,
                index,
                total,
                bytes = bytes.len(),
                "Tile done"
            );
            report(DownloadPhase::Done);
            Ok(bytes)
        }
        Err(source) => {
            warn!(
                column = descriptor.column,
                row = descriptor.row,
                url = %descriptor.url,
                error = %source,
                "Tile fetch failed, aborting download"
            );
            report(DownloadPhase::Failed);
            Err(DownloadError::Tile {
                column: descriptor.column,
                row: descriptor.row,
                source,
            })
        }
    }
}
