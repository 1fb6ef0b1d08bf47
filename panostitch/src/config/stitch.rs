//! Runtime stitching configuration.

use super::defaults::*;
use crate::compose::OutputFormat;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Every tunable of a stitching run.
///
/// Groups all parameters needed by the planner, fetcher, downloader and
/// compositor, providing sensible defaults while allowing customization.
///
/// # Example
///
/// ```
/// use panostitch::config::StitchConfig;
/// use std::time::Duration;
///
/// let config = StitchConfig::new("ABC")
///     .with_zoom(2)
///     .with_interval(Duration::from_millis(500))
///     .with_output_path("abc.png");
///
/// assert_eq!(config.panorama_id(), "ABC");
/// assert_eq!(config.zoom(), 2);
/// assert_eq!(config.tile_size(), 512);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StitchConfig {
    panorama_id: String,
    zoom: u8,
    tile_size: u32,
    trim_threshold: u8,
    interval: Duration,
    burst: u32,
    concurrency: usize,
    request_timeout_secs: u64,
    jpeg_quality: u8,
    host: String,
    endpoint: String,
    output_path: PathBuf,
    format: Option<OutputFormat>,
}

impl StitchConfig {
    /// Creates a configuration for `panorama_id` with default values.
    pub fn new(panorama_id: impl Into<String>) -> Self {
        Self {
            panorama_id: panorama_id.into(),
            ..Self::default()
        }
    }

    /// Set the panorama id.
    pub fn with_panorama_id(mut self, panorama_id: impl Into<String>) -> Self {
        self.panorama_id = panorama_id.into();
        self
    }

    /// Set the zoom level. Default: 4.
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the tile edge length in pixels. Default: 512.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the trim threshold. Default: 6.
    pub fn with_trim_threshold(mut self, threshold: u8) -> Self {
        self.trim_threshold = threshold;
        self
    }

    /// Set the minimum spacing between requests. Default: 200ms.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the limiter burst. Values below 1 are treated as 1.
    pub fn with_burst(mut self, burst: u32) -> Self {
        self.burst = burst.max(1);
        self
    }

    /// Set the number of download workers, clamped to `1..=MAX_CONCURRENCY`.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
        self
    }

    /// Set the HTTP request timeout in seconds. Default: 30.
    pub fn with_request_timeout_secs(mut self, timeout: u64) -> Self {
        self.request_timeout_secs = timeout;
        self
    }

    /// Set the JPEG quality, clamped to 1-100. Default: 75.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the tile server host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the tile endpoint path.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the output file path.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Force an output format instead of inferring it from the path.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn panorama_id(&self) -> &str {
        &self.panorama_id
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn trim_threshold(&self) -> u8 {
        self.trim_threshold
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn burst(&self) -> u32 {
        self.burst
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Resolves the output format.
    ///
    /// An explicit format wins. Otherwise it is inferred from the output
    /// path's extension, and `None` is returned if the extension is not one
    /// of `.jpg`, `.jpeg` or `.png`.
    pub fn output_format(&self) -> Option<OutputFormat> {
        match self.format {
            Some(OutputFormat::Jpeg { .. }) => Some(OutputFormat::Jpeg {
                quality: self.jpeg_quality,
            }),
            Some(format) => Some(format),
            None => OutputFormat::from_path(&self.output_path, self.jpeg_quality),
        }
    }
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            panorama_id: DEFAULT_PANORAMA_ID.to_string(),
            zoom: DEFAULT_ZOOM,
            tile_size: DEFAULT_TILE_SIZE,
            trim_threshold: DEFAULT_TRIM_THRESHOLD,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            burst: DEFAULT_BURST,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            host: DEFAULT_HOST.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            format: None,
        }
    }
}
