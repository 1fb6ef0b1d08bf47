//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use panostitch::compose::{OutputFormat, DEFAULT_JPEG_QUALITY};
use panostitch::config::ConfigFile;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Output format selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    /// JPEG (lossy, quality set by --quality)
    Jpeg,
    /// PNG (lossless, larger files)
    Png,
}

impl FormatArg {
    /// Convert to the library output format.
    pub fn to_output_format(self) -> OutputFormat {
        match self {
            FormatArg::Jpeg => OutputFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            },
            FormatArg::Png => OutputFormat::Png,
        }
    }
}

/// Load the config file from `path`, or the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "config file '{}' does not exist",
                    path.display()
                )));
            }
            Ok(ConfigFile::load_from(path)?)
        }
        None => Ok(ConfigFile::load()?),
    }
}

/// Resolve the panorama id: CLI argument first, then the config file.
pub fn resolve_panorama_id(arg: Option<String>, config: &ConfigFile) -> String {
    arg.unwrap_or_else(|| config.stitch.panorama_id.clone())
}

/// Resolve the output path: CLI argument first, then the config file.
pub fn resolve_output(arg: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    arg.unwrap_or_else(|| config.output.path.clone())
}
