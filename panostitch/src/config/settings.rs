//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Tile source settings
    pub source: SourceSettings,
    /// Fetch and rate limit settings
    pub fetch: FetchSettings,
    /// Stitching settings
    pub stitch: StitchSettings,
    /// Output settings
    pub output: OutputSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Tile source configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    /// Tile server host name
    pub host: String,
    /// Tile endpoint path on the host
    pub endpoint: String,
    /// Tile edge length in pixels
    pub tile_size: u32,
}

/// Fetch configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Minimum spacing between requests in milliseconds
    pub interval_ms: u64,
    /// Requests admitted back-to-back before spacing applies
    pub burst: u32,
    /// Timeout in seconds for HTTP requests
    pub timeout: u64,
    /// Number of download workers (1 = sequential)
    pub concurrency: usize,
}

/// Stitching configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StitchSettings {
    /// Panorama fetched when none is given on the command line
    pub panorama_id: String,
    /// Zoom level
    pub zoom: u8,
    /// Per-channel difference above which a pixel counts as content
    pub trim_threshold: u8,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// Output image path
    pub path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
