//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, and file operations
//! to reduce duplication across command handlers.

use crate::error::CliError;
use panostitch::config::{config_file_path, ConfigFile};
use panostitch::logging::{default_log_file, init_logging, LoggingGuard};
use panostitch::stitch::StitchOutput;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    /// Where the configuration was loaded from
    config_path: PathBuf,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file to load instead of ~/.panostitch/config.ini
    /// * `debug_mode` - When true, enables debug-level logging and mirrors
    ///   log lines to stdout
    pub fn new(config_path: Option<&Path>, debug_mode: bool) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| default_log_file().to_string());

        let logging_guard = init_logging(&log_dir, &log_file, debug_mode, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("panostitch v{}", panostitch::VERSION);
        info!(
            config = %self.config_path.display(),
            "panostitch CLI: {} command", command
        );
    }

    /// Write an encoded panorama to `path`.
    pub fn save_output(&self, path: &Path, output: &StitchOutput) -> Result<(), CliError> {
        output.save(path).map_err(|e| CliError::FileWrite {
            path: path.display().to_string(),
            error: e,
        })?;

        let size_mb = output.bytes.len() as f64 / 1_048_576.0;
        info!(
            path = %path.display(),
            width = output.width,
            height = output.height,
            bytes = output.bytes.len(),
            "Panorama saved"
        );
        println!("✓ Saved successfully: {} ({:.2} MB)", path.display(), size_mb);
        println!("  Dimensions: {}×{}", output.width, output.height);
        println!(
            "  Canvas: {}×{} from {} tiles ({})",
            output.canvas_size.0, output.canvas_size.1, output.tiles, output.grid
        );

        Ok(())
    }
}
