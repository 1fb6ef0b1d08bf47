//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use panostitch::config::ConfigFileError;
use panostitch::grid::GridError;
use panostitch::provider::ProviderError;
use panostitch::stitch::{PipelineStage, StitchError};
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create the HTTP client or async runtime
    Setup(String),
    /// The stitching pipeline failed
    Stitch(StitchError),
    /// The user interrupted the run
    Interrupted,
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Stitch(StitchError::Plan(GridError::UnsupportedZoom { max, .. })) => {
                eprintln!();
                eprintln!("Street View panoramas are served at zoom 1 to {}.", max);
                eprintln!("Try a lower --zoom.");
            }
            CliError::Stitch(StitchError::Fetch(e)) if is_http_status(e, 400..500) => {
                eprintln!();
                eprintln!("The tile server rejected the request. Make sure:");
                eprintln!("  1. The panorama id is correct (copy it from the panorama URL)");
                eprintln!("  2. The panorama is available at the requested zoom level");
            }
            CliError::Stitch(err) if err.stage() == PipelineStage::Trimmed => {
                eprintln!();
                eprintln!("Every tile was blank. The panorama id may not exist, or");
                eprintln!("--trim-threshold may be too high.");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Run 'panostitch config path' to locate the configuration file.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

/// Returns true if a download failed with an HTTP status in `range`.
fn is_http_status(err: &panostitch::download::DownloadError, range: std::ops::Range<u16>) -> bool {
    use panostitch::download::DownloadError;
    use panostitch::fetch::FetchError;

    match err {
        DownloadError::Tile {
            source: FetchError::Network { source, .. },
            ..
        } => source.status().is_some_and(|s| range.contains(&s)),
        _ => false,
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Setup(msg) => write!(f, "Setup failed: {}", msg),
            CliError::Stitch(e) => write!(f, "Stitching failed while {}: {}", e.stage(), e),
            CliError::Interrupted => write!(f, "Interrupted, no output written"),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Stitch(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Setup(e.to_string())
    }
}

impl From<StitchError> for CliError {
    fn from(e: StitchError) -> Self {
        if e.is_cancelled() {
            CliError::Interrupted
        } else {
            CliError::Stitch(e)
        }
    }
}
