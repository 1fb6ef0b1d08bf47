//! End-to-end panorama stitcher.

use super::{PipelineStage, StageCallback, StitchError};
use crate::compose::{Imaging, OutputFormat, PanoramaCompositor, TrimBox};
use crate::config::StitchConfig;
use crate::download::{DownloadProgressCallback, TileDownloader};
use crate::fetch::{RateLimitedFetcher, RateLimiter};
use crate::grid::{GridDimensions, GridPlanner, TilePlan};
use crate::provider::{AsyncHttpClient, StreetViewTileSource};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Encoded panorama and what went into it.
#[derive(Debug, Clone)]
pub struct StitchOutput {
    /// Encoded image
    pub bytes: Vec<u8>,
    /// Format of `bytes`
    pub format: OutputFormat,
    /// Width of the trimmed panorama
    pub width: u32,
    /// Height of the trimmed panorama
    pub height: u32,
    /// Canvas size before trimming
    pub canvas_size: (u32, u32),
    /// Tile grid
    pub grid: GridDimensions,
    /// Number of tiles downloaded
    pub tiles: usize,
    /// Crop applied to the canvas
    pub trim: TrimBox,
}

impl StitchOutput {
    /// Writes the encoded image to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, &self.bytes)
    }
}

/// Runs the whole pipeline for one panorama.
///
/// ```text
/// plan ──► download (rate limited) ──► compose + trim ──► encode
///           async                       spawn_blocking     spawn_blocking
/// ```
///
/// Every tile is downloaded before composition starts. The first error from
/// any stage ends the run.
///
/// # Example
///
/// ```ignore
/// use panostitch::compose::RasterImaging;
/// use panostitch::config::StitchConfig;
/// use panostitch::provider::AsyncReqwestClient;
/// use panostitch::stitch::PanoramaStitcher;
///
/// let config = StitchConfig::new("KGt-9AaQ7UTn_PgwRqtTOg").with_zoom(3);
/// let client = AsyncReqwestClient::with_timeout(config.request_timeout_secs())?;
/// let stitcher = PanoramaStitcher::new(config, client, RasterImaging);
///
/// let output = stitcher.run(&CancellationToken::new()).await?;
/// output.save(stitcher.config().output_path())?;
/// ```
pub struct PanoramaStitcher<C: AsyncHttpClient, I: Imaging> {
    config: StitchConfig,
    planner: GridPlanner<StreetViewTileSource>,
    downloader: TileDownloader<RateLimitedFetcher<C>>,
    compositor: Arc<PanoramaCompositor<I>>,
    limiter: Arc<RateLimiter>,
    format: OutputFormat,
    on_stage: Option<StageCallback>,
}

impl<C, I> PanoramaStitcher<C, I>
where
    C: AsyncHttpClient + 'static,
    I: Imaging + 'static,
{
    /// Wires the pipeline from `config`.
    ///
    /// The output format follows [`StitchConfig::output_format`], falling back
    /// to JPEG when the output path has no recognised extension.
    pub fn new(config: StitchConfig, client: C, imaging: I) -> Self {
        let source = StreetViewTileSource::new(config.host(), config.endpoint());
        let limiter = Arc::new(RateLimiter::new(config.interval(), config.burst()));
        let fetcher = RateLimitedFetcher::new(client, Arc::clone(&limiter));
        let downloader =
            TileDownloader::new(Arc::new(fetcher)).with_concurrency(config.concurrency());
        let compositor = PanoramaCompositor::new(imaging, config.tile_size())
            .with_trim_threshold(config.trim_threshold());

        let format = config.output_format().unwrap_or_else(|| {
            warn!(
                path = %config.output_path().display(),
                "Unrecognised output extension, encoding as JPEG"
            );
            OutputFormat::Jpeg {
                quality: config.jpeg_quality(),
            }
        });

        Self {
            config,
            planner: GridPlanner::new(source),
            downloader,
            compositor: Arc::new(compositor),
            limiter,
            format,
            on_stage: None,
        }
    }

    /// Sets a per-tile progress callback.
    pub fn with_progress(mut self, callback: DownloadProgressCallback) -> Self {
        self.downloader = self.downloader.with_progress(callback);
        self
    }

    /// Sets a callback invoked on every stage transition.
    pub fn with_stage_callback(mut self, callback: StageCallback) -> Self {
        self.on_stage = Some(callback);
        self
    }

    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Returns the limiter shared by every request of this stitcher.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Returns the format the panorama will be encoded in.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Builds the tile plan without fetching anything.
    pub fn plan(&self) -> Result<TilePlan, StitchError> {
        Ok(self
            .planner
            .plan(self.config.panorama_id(), self.config.zoom())?)
    }

    /// Runs the pipeline and returns the encoded panorama.
    #[instrument(skip_all, fields(panorama_id = self.config.panorama_id(), zoom = self.config.zoom()))]
    pub async fn run(&self, cancel: &CancellationToken) -> Result<StitchOutput, StitchError> {
        let started = Instant::now();

        let plan = self.plan()?;
        let grid = plan.dimensions();
        let zoom = plan.zoom();
        // An impossible canvas must fail before any request is made
        self.compositor.canvas_size(grid)?;
        info!(
            grid = %grid,
            tiles = plan.len(),
            interval_ms = self.limiter.interval().as_millis() as u64,
            concurrency = self.downloader.concurrency(),
            "Tile plan ready"
        );
        self.enter(PipelineStage::Planned);

        self.enter(PipelineStage::Fetching);
        let tiles = self.downloader.download_all(&plan, cancel).await?;
        let tile_count = tiles.len();
        info!(
            tiles = tile_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "All tiles downloaded"
        );

        if cancel.is_cancelled() {
            return Err(StitchError::Cancelled {
                stage: PipelineStage::Composing,
            });
        }

        self.enter(PipelineStage::Composing);
        let compositor = Arc::clone(&self.compositor);
        let composition = tokio::task::spawn_blocking(move || compositor.compose(&tiles, zoom))
            .await
            .map_err(|e| StitchError::Task {
                stage: PipelineStage::Composing,
                message: e.to_string(),
            })??;

        let trim = composition.trim;
        info!(
            canvas_width = composition.canvas_size.0,
            canvas_height = composition.canvas_size.1,
            %trim,
            "Panorama composed"
        );
        self.enter(PipelineStage::Trimmed);

        if cancel.is_cancelled() {
            return Err(StitchError::Cancelled {
                stage: PipelineStage::Encoded,
            });
        }

        let compositor = Arc::clone(&self.compositor);
        let format = self.format;
        let image = composition.image;
        let bytes = tokio::task::spawn_blocking(move || compositor.encode(&image, format))
            .await
            .map_err(|e| StitchError::Task {
                stage: PipelineStage::Encoded,
                message: e.to_string(),
            })?
            .map_err(StitchError::Encode)?;

        info!(
            width = trim.width,
            height = trim.height,
            bytes = bytes.len(),
            format = format.extension(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Panorama encoded"
        );
        self.enter(PipelineStage::Encoded);

        Ok(StitchOutput {
            bytes,
            format,
            width: trim.width,
            height: trim.height,
            canvas_size: composition.canvas_size,
            grid,
            tiles: tile_count,
            trim,
        })
    }

    fn enter(&self, stage: PipelineStage) {
        if let Some(callback) = &self.on_stage {
            callback(stage);
        }
    }
}
