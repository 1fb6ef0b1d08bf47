//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;

pub use crate::compose::{
    DEFAULT_JPEG_QUALITY, DEFAULT_TILE_SIZE, DEFAULT_TRIM_THRESHOLD, MAX_TILE_SIZE,
};
pub use crate::fetch::MAX_BURST;
pub use crate::provider::{DEFAULT_ENDPOINT, DEFAULT_HOST, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Panorama fetched when none is specified.
pub const DEFAULT_PANORAMA_ID: &str = "KGt-9AaQ7UTn_PgwRqtTOg";

/// Default zoom level (16 × 8 tiles).
pub const DEFAULT_ZOOM: u8 = 4;

/// Default spacing between tile requests in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 200;

/// Longest request spacing accepted from configuration (one hour).
pub const MAX_INTERVAL_MS: u64 = 3_600_000;

/// Default limiter burst.
pub const DEFAULT_BURST: u32 = 1;

/// Default number of download workers.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Upper bound on download workers.
pub const MAX_CONCURRENCY: usize = 16;

/// Default output file.
pub const DEFAULT_OUTPUT_FILE: &str = "pano.jpg";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "panostitch.log";

/// Default log file path (~/.panostitch/panostitch.log).
pub fn default_log_path() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            source: SourceSettings {
                host: DEFAULT_HOST.to_string(),
                endpoint: DEFAULT_ENDPOINT.to_string(),
                tile_size: DEFAULT_TILE_SIZE,
            },
            fetch: FetchSettings {
                interval_ms: DEFAULT_INTERVAL_MS,
                burst: DEFAULT_BURST,
                timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
                concurrency: DEFAULT_CONCURRENCY,
            },
            stitch: StitchSettings {
                panorama_id: DEFAULT_PANORAMA_ID.to_string(),
                zoom: DEFAULT_ZOOM,
                trim_threshold: DEFAULT_TRIM_THRESHOLD,
                jpeg_quality: DEFAULT_JPEG_QUALITY,
            },
            output: OutputSettings {
                path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            },
            logging: LoggingSettings {
                file: default_log_path(),
            },
        }
    }
}
