//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::{MAX_BURST, MAX_CONCURRENCY, MAX_INTERVAL_MS, MAX_TILE_SIZE};
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::grid::MAX_ZOOM;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [source] section
    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = section.get("host") {
            let v = v.trim();
            if v.is_empty() || v.contains('/') {
                return Err(invalid(
                    "source",
                    "host",
                    v,
                    "must be a bare host name such as 'cbk0.google.com'",
                ));
            }
            config.source.host = v.to_string();
        }
        if let Some(v) = section.get("endpoint") {
            let v = v.trim().trim_start_matches('/');
            if v.is_empty() {
                return Err(invalid("source", "endpoint", v, "must not be empty"));
            }
            config.source.endpoint = v.to_string();
        }
        if let Some(v) = section.get("tile_size") {
            config.source.tile_size = parse_at_most("source", "tile_size", v, MAX_TILE_SIZE)?;
        }
    }

    // [fetch] section
    if let Some(section) = ini.section(Some("fetch")) {
        if let Some(v) = section.get("interval_ms") {
            let reason = format!("must be between 0 and {} milliseconds", MAX_INTERVAL_MS);
            let interval_ms: u64 = parse_number("fetch", "interval_ms", v, &reason)?;
            if interval_ms > MAX_INTERVAL_MS {
                return Err(invalid("fetch", "interval_ms", v, &reason));
            }
            config.fetch.interval_ms = interval_ms;
        }
        if let Some(v) = section.get("burst") {
            config.fetch.burst = parse_at_most("fetch", "burst", v, MAX_BURST)?;
        }
        if let Some(v) = section.get("timeout") {
            config.fetch.timeout = parse_positive("fetch", "timeout", v)?;
        }
        if let Some(v) = section.get("concurrency") {
            config.fetch.concurrency = parse_at_most("fetch", "concurrency", v, MAX_CONCURRENCY)?;
        }
    }

    // [stitch] section
    if let Some(section) = ini.section(Some("stitch")) {
        if let Some(v) = section.get("panorama_id") {
            let v = v.trim();
            if v.is_empty() {
                return Err(invalid("stitch", "panorama_id", v, "must not be empty"));
            }
            config.stitch.panorama_id = v.to_string();
        }
        if let Some(v) = section.get("zoom") {
            let reason = format!("must be between 1 and {}", MAX_ZOOM);
            let zoom: u8 = parse_number("stitch", "zoom", v, &reason)?;
            if zoom == 0 || zoom > MAX_ZOOM {
                return Err(invalid("stitch", "zoom", v, &reason));
            }
            config.stitch.zoom = zoom;
        }
        if let Some(v) = section.get("trim_threshold") {
            config.stitch.trim_threshold =
                parse_number("stitch", "trim_threshold", v, "must be between 0 and 255")?;
        }
        if let Some(v) = section.get("jpeg_quality") {
            let quality: u8 =
                parse_number("stitch", "jpeg_quality", v, "must be between 1 and 100")?;
            if !(1..=100).contains(&quality) {
                return Err(invalid(
                    "stitch",
                    "jpeg_quality",
                    v,
                    "must be between 1 and 100",
                ));
            }
            config.stitch.jpeg_quality = quality;
        }
    }

    // [output] section
    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("path") {
            let v = v.trim();
            if !v.is_empty() {
                config.output.path = expand_tilde(v);
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parses a number, reporting `reason` on failure.
fn parse_number<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

/// Parses a number that must be greater than zero.
fn parse_positive<T: FromStr + PartialOrd + Default>(
    section: &str,
    key: &str,
    value: &str,
) -> Result<T, ConfigFileError> {
    let reason = "must be a positive integer";
    let n: T = parse_number(section, key, value, reason)?;
    if n <= T::default() {
        return Err(invalid(section, key, value, reason));
    }
    Ok(n)
}

/// Parses a number in `1..=max`.
fn parse_at_most<T>(section: &str, key: &str, value: &str, max: T) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialOrd + Default + std::fmt::Display,
{
    let reason = format!("must be between 1 and {}", max);
    let n: T = parse_number(section, key, value, &reason)?;
    if n <= T::default() || n > max {
        return Err(invalid(section, key, value, &reason));
    }
    Ok(n)
}

/// Expand `~/` at the start of a path to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    fn assert_invalid(result: Result<ConfigFile, ConfigFileError>, section: &str, key: &str) {
        match result {
            Err(ConfigFileError::InvalidValue {
                section: s, key: k, ..
            }) => {
                assert_eq!(s, section);
                assert_eq!(k, key);
            }
            other => panic!("expected InvalidValue for {}.{}, got {:?}", section, key, other),
        }
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = load("").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_full_config() {
        let config = load(
            r#"
[source]
host = tiles.example.com
endpoint = /pano
tile_size = 256

[fetch]
interval_ms = 500
burst = 2
timeout = 10
concurrency = 4

[stitch]
panorama_id = ABC
zoom = 2
trim_threshold = 12
jpeg_quality = 90

[output]
path = /tmp/out.png

[logging]
file = /tmp/panostitch.log
"#,
        )
        .unwrap();

        assert_eq!(config.source.host, "tiles.example.com");
        assert_eq!(config.source.endpoint, "pano");
        assert_eq!(config.source.tile_size, 256);
        assert_eq!(config.fetch.interval_ms, 500);
        assert_eq!(config.fetch.burst, 2);
        assert_eq!(config.fetch.timeout, 10);
        assert_eq!(config.fetch.concurrency, 4);
        assert_eq!(config.stitch.panorama_id, "ABC");
        assert_eq!(config.stitch.zoom, 2);
        assert_eq!(config.stitch.trim_threshold, 12);
        assert_eq!(config.stitch.jpeg_quality, 90);
        assert_eq!(config.output.path, PathBuf::from("/tmp/out.png"));
        assert_eq!(config.logging.file, PathBuf::from("/tmp/panostitch.log"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = load("[stitch]\nzoom = 3\n").unwrap();
        assert_eq!(config.stitch.zoom, 3);
        assert_eq!(config.stitch.trim_threshold, DEFAULT_TRIM_THRESHOLD);
        assert_eq!(config.fetch.interval_ms, DEFAULT_INTERVAL_MS);
        assert_eq!(config.source.host, DEFAULT_HOST);
    }

    #[test]
    fn test_zero_interval_is_allowed() {
        let config = load("[fetch]\ninterval_ms = 0\n").unwrap();
        assert_eq!(config.fetch.interval_ms, 0);
    }

    #[test]
    fn test_invalid_values() {
        assert_invalid(load("[stitch]\nzoom = 0\n"), "stitch", "zoom");
        assert_invalid(load("[stitch]\nzoom = 17\n"), "stitch", "zoom");
        assert_invalid(load("[stitch]\nzoom = high\n"), "stitch", "zoom");
        assert_invalid(
            load("[stitch]\ntrim_threshold = 300\n"),
            "stitch",
            "trim_threshold",
        );
        assert_invalid(
            load("[stitch]\njpeg_quality = 0\n"),
            "stitch",
            "jpeg_quality",
        );
        assert_invalid(load("[stitch]\npanorama_id =\n"), "stitch", "panorama_id");
        assert_invalid(load("[fetch]\nburst = 0\n"), "fetch", "burst");
        assert_invalid(load("[fetch]\ninterval_ms = -5\n"), "fetch", "interval_ms");
        assert_invalid(load("[fetch]\nconcurrency = 99\n"), "fetch", "concurrency");
        assert_invalid(load("[fetch]\ntimeout = 0\n"), "fetch", "timeout");
        assert_invalid(load("[source]\ntile_size = 0\n"), "source", "tile_size");
        assert_invalid(load("[source]\nhost = a/b\n"), "source", "host");
    }

    #[test]
    fn test_oversized_values_are_rejected() {
        assert_invalid(load("[source]\ntile_size = 268435456\n"), "source", "tile_size");
        assert_invalid(
            load("[fetch]\ninterval_ms = 18446744073709551615\n"),
            "fetch",
            "interval_ms",
        );
        assert_invalid(load("[fetch]\nburst = 4294967295\n"), "fetch", "burst");

        let config = load(&format!(
            "[source]\ntile_size = {}\n\n[fetch]\ninterval_ms = {}\nburst = {}\n",
            MAX_TILE_SIZE, MAX_INTERVAL_MS, MAX_BURST
        ))
        .unwrap();
        assert_eq!(config.source.tile_size, MAX_TILE_SIZE);
        assert_eq!(config.fetch.interval_ms, MAX_INTERVAL_MS);
        assert_eq!(config.fetch.burst, MAX_BURST);
        assert_eq!(
            std::time::Duration::from_millis(MAX_INTERVAL_MS),
            crate::fetch::MAX_INTERVAL
        );
    }

    #[test]
    fn test_invalid_value_message() {
        let err = load("[stitch]\nzoom = 0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: stitch.zoom = '0' - must be between 1 and 16"
        );
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/pano.jpg"), home.join("pano.jpg"));
        }
        assert_eq!(expand_tilde("/abs/pano.jpg"), PathBuf::from("/abs/pano.jpg"));
        assert_eq!(expand_tilde("pano.jpg"), PathBuf::from("pano.jpg"));
    }
}
