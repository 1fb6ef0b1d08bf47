//! panostitch CLI - Command-line interface
//!
//! This binary provides a command-line interface to the panostitch library.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::fetch::FetchArgs;
use commands::plan::PlanArgs;

#[derive(Parser)]
#[command(name = "panostitch")]
#[command(version = panostitch::VERSION)]
#[command(about = "Download Street View panoramas and stitch them into one image", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download every tile of a panorama and write the stitched image
    Fetch(FetchArgs),

    /// Print the tile URLs of a panorama without downloading them
    Plan(PlanArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
