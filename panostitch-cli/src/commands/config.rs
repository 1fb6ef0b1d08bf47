//! Configuration management CLI commands.
//!
//! Provides `config init`, `config path` and `config show` for creating and
//! inspecting the configuration file from the command line.

use clap::Subcommand;
use panostitch::config::{config_file_path, ConfigFile};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a commented configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Write to this path instead of ~/.panostitch/config.ini
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show {
        /// Read this file instead of ~/.panostitch/config.ini
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init { force, path } => {
            run_init(&path.unwrap_or_else(config_file_path), force)
        }
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show { path } => run_show(&path.unwrap_or_else(config_file_path)),
    }
}

/// Write the default configuration.
fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    ConfigFile::default().save_to(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

/// Show the effective configuration.
fn run_show(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    print!("{}", render_settings(&config));
    Ok(())
}

fn render_settings(config: &ConfigFile) -> String {
    let sections: [(&str, Vec<(&str, String)>); 5] = [
        (
            "source",
            vec![
                ("host", config.source.host.clone()),
                ("endpoint", config.source.endpoint.clone()),
                ("tile_size", config.source.tile_size.to_string()),
            ],
        ),
        (
            "fetch",
            vec![
                ("interval_ms", config.fetch.interval_ms.to_string()),
                ("burst", config.fetch.burst.to_string()),
                ("timeout", config.fetch.timeout.to_string()),
                ("concurrency", config.fetch.concurrency.to_string()),
            ],
        ),
        (
            "stitch",
            vec![
                ("panorama_id", config.stitch.panorama_id.clone()),
                ("zoom", config.stitch.zoom.to_string()),
                ("trim_threshold", config.stitch.trim_threshold.to_string()),
                ("jpeg_quality", config.stitch.jpeg_quality.to_string()),
            ],
        ),
        (
            "output",
            vec![("path", config.output.path.display().to_string())],
        ),
        (
            "logging",
            vec![("file", config.logging.file.display().to_string())],
        ),
    ];

    let mut out = String::new();
    for (section, values) in sections {
        out.push_str(&format!("\n[{}]\n", section));
        for (key, value) in values {
            out.push_str(&format!("  {} = {}\n", key, value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");

        run_init(&path, false).unwrap();

        assert!(path.exists());
        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(&path, "[stitch]\nzoom = 2\n").unwrap();

        run_init(&path, false).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap().stitch.zoom, 2);

        run_init(&path, true).unwrap();
        assert_eq!(
            ConfigFile::load_from(&path).unwrap().stitch.zoom,
            ConfigFile::default().stitch.zoom
        );
    }

    #[test]
    fn test_render_settings_lists_every_section() {
        let rendered = render_settings(&ConfigFile::default());
        for section in ["[source]", "[fetch]", "[stitch]", "[output]", "[logging]"] {
            assert!(rendered.contains(section), "missing {}", section);
        }
        assert!(rendered.contains("  interval_ms = 200"));
    }
}
