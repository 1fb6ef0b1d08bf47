//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[source]
; Tile server host name (default: cbk0.google.com)
host = {}
; Tile endpoint path on the host (default: cbk)
endpoint = {}
; Edge length of one tile in pixels (default: 512)
tile_size = {}

[fetch]
; Minimum spacing between tile requests in milliseconds (default: 200)
interval_ms = {}
; Requests admitted back-to-back before spacing applies (default: 1)
burst = {}
; Timeout in seconds for HTTP requests (default: 30)
timeout = {}
; Number of download workers, 1-16 (default: 1 = sequential)
; All workers share the same rate limit
concurrency = {}

[stitch]
; Panorama fetched when none is given on the command line
panorama_id = {}
; Zoom level: grid is 2^zoom x 2^(zoom-1) tiles (default: 4)
zoom = {}
; Per-channel difference from black above which a pixel is kept when
; trimming the padding around the panorama (default: 6)
trim_threshold = {}
; JPEG quality, 1-100 (default: 75)
jpeg_quality = {}

[output]
; Output image path. Format follows the extension: .jpg, .jpeg or .png
path = {}

[logging]
; Log file path (default: ~/.panostitch/panostitch.log)
file = {}
"#,
        config.source.host,
        config.source.endpoint,
        config.source.tile_size,
        config.fetch.interval_ms,
        config.fetch.burst,
        config.fetch.timeout,
        config.fetch.concurrency,
        config.stitch.panorama_id,
        config.stitch.zoom,
        config.stitch.trim_threshold,
        config.stitch.jpeg_quality,
        path_to_string(&config.output.path),
        path_to_string(&config.logging.file),
    )
}

/// Render a path, collapsing the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
