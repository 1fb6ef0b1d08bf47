//! Configuration for panostitch.
//!
//! Two layers:
//!
//! - [`ConfigFile`]: the user's `~/.panostitch/config.ini`, one struct per
//!   INI section
//! - [`StitchConfig`]: the runtime value handed to the stitcher, built from
//!   the file with [`ConfigFile::to_stitch_config`] and then overridden by
//!   command-line flags
//!
//! # Example
//!
//! ```
//! use panostitch::config::{ConfigFile, StitchConfig};
//!
//! let config = ConfigFile::default().to_stitch_config().with_zoom(2);
//! assert_eq!(config.zoom(), 2);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod stitch;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, FetchSettings, LoggingSettings, OutputSettings, SourceSettings, StitchSettings,
};
pub use stitch::StitchConfig;
