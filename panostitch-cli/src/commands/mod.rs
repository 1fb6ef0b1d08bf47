//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (init, path, show)
//! - [`fetch`] - Download and stitch a panorama
//! - [`plan`] - Print tile URLs without fetching

pub mod common;
pub mod config;
pub mod fetch;
pub mod plan;
