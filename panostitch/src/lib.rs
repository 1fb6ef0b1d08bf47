//! panostitch - Street View panorama downloader and stitcher
//!
//! This library fetches the tile grid of a panoramic photo from a tile server
//! at a fixed request rate and assembles the tiles into one image with the
//! black padding around the sphere projection trimmed away.
//!
//! # High-Level API
//!
//! For most use cases, the [`stitch`] module runs the whole pipeline:
//!
//! ```ignore
//! use panostitch::compose::RasterImaging;
//! use panostitch::config::StitchConfig;
//! use panostitch::provider::AsyncReqwestClient;
//! use panostitch::stitch::PanoramaStitcher;
//!
//! let config = StitchConfig::new("KGt-9AaQ7UTn_PgwRqtTOg").with_zoom(4);
//! let client = AsyncReqwestClient::with_timeout(config.request_timeout_secs())?;
//! let stitcher = PanoramaStitcher::new(config, client, RasterImaging);
//!
//! let output = stitcher.run(&cancel).await?;
//! output.save(stitcher.config().output_path())?;
//! ```
//!
//! # Modules
//!
//! - [`provider`]: HTTP transport and tile URL templates
//! - [`grid`]: zoom levels, grid dimensions and tile planning
//! - [`fetch`]: rate limiter and rate-limited fetcher
//! - [`download`]: all-or-nothing tile download
//! - [`compose`]: canvas assembly, trimming and encoding
//! - [`stitch`]: the end-to-end pipeline
//! - [`config`]: INI config file and runtime configuration
//! - [`logging`]: tracing subscriber setup

pub mod compose;
pub mod config;
pub mod download;
pub mod fetch;
pub mod grid;
pub mod logging;
pub mod provider;
pub mod stitch;

/// Version of the panostitch library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
