//! Fetch command - download and stitch one panorama.

use clap::Args;
use panostitch::compose::RasterImaging;
use panostitch::config::{ConfigFile, StitchConfig, MAX_BURST, MAX_INTERVAL_MS};
use panostitch::download::{DownloadPhase, DownloadProgress};
use panostitch::provider::AsyncReqwestClient;
use panostitch::stitch::{PanoramaStitcher, PipelineStage};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::common::{load_config, resolve_output, resolve_panorama_id, FormatArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Panorama id (defaults to stitch.panorama_id from the config file)
    pub panorama_id: Option<String>,

    /// Zoom level: grid is 2^zoom × 2^(zoom-1) tiles
    #[arg(long, short)]
    pub zoom: Option<u8>,

    /// Output file path (.jpg, .jpeg or .png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output format (inferred from the output extension if not specified)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Per-channel difference from black above which a pixel is kept
    #[arg(long)]
    pub trim_threshold: Option<u8>,

    /// Minimum spacing between tile requests in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=MAX_INTERVAL_MS))]
    pub interval_ms: Option<u64>,

    /// Requests admitted back-to-back before spacing applies
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_BURST)))]
    pub burst: Option<u32>,

    /// Number of download workers (all share the same rate limit)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// JPEG quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Config file to use instead of ~/.panostitch/config.ini
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging and mirror log lines to stdout
    #[arg(long)]
    pub debug: bool,
}

/// Build the runtime configuration: config file values overridden by flags.
pub fn build_config(args: &FetchArgs, file: &ConfigFile) -> StitchConfig {
    let mut config = file
        .to_stitch_config()
        .with_panorama_id(resolve_panorama_id(args.panorama_id.clone(), file))
        .with_output_path(resolve_output(args.output.clone(), file));

    if let Some(zoom) = args.zoom {
        config = config.with_zoom(zoom);
    }
    if let Some(format) = args.format {
        config = config.with_format(format.to_output_format());
    }
    if let Some(threshold) = args.trim_threshold {
        config = config.with_trim_threshold(threshold);
    }
    if let Some(ms) = args.interval_ms {
        config = config.with_interval(Duration::from_millis(ms));
    }
    if let Some(burst) = args.burst {
        config = config.with_burst(burst);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(quality) = args.quality {
        config = config.with_jpeg_quality(quality);
    }

    config
}

/// Run the fetch command.
pub fn run(args: FetchArgs) -> Result<(), CliError> {
    // Fail on a bad --config before logging truncates anything
    load_config(args.config.as_deref())?;

    let runner = CliRunner::new(args.config.as_deref(), args.debug)?;
    runner.log_startup("fetch");

    let config = build_config(&args, runner.config());
    let format = config.output_format().ok_or_else(|| {
        CliError::Config(format!(
            "cannot infer an image format from '{}', use --format jpeg|png",
            config.output_path().display()
        ))
    })?;

    let client = AsyncReqwestClient::with_timeout(config.request_timeout_secs())?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Setup(format!("Failed to create async runtime: {}", e)))?;

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        handler_token.cancel();
    })
    .map_err(|e| CliError::Setup(format!("Failed to set signal handler: {}", e)))?;

    println!("Stitching panorama:");
    println!("  Panorama: {}", config.panorama_id());
    println!("  Zoom: {}", config.zoom());
    println!(
        "  Rate: 1 request / {} ms (burst {}, {} worker(s))",
        config.interval().as_millis(),
        config.burst(),
        config.concurrency()
    );
    println!("  Output: {} ({})", config.output_path().display(), format.extension());
    println!();

    let stitcher = PanoramaStitcher::new(config, client, RasterImaging)
        .with_progress(Arc::new(print_progress))
        .with_stage_callback(Arc::new(print_stage));

    let start = Instant::now();
    let output = runtime.block_on(stitcher.run(&cancel))?;
    let elapsed = start.elapsed();

    info!(elapsed_ms = elapsed.as_millis() as u64, "Stitch complete");
    println!("Stitched in {:.2}s", elapsed.as_secs_f64());
    println!();

    runner.save_output(stitcher.config().output_path(), &output)
}

fn print_progress(progress: DownloadProgress) {
    match progress.phase {
        DownloadPhase::Done => println!(
            "  [{:>4}/{}] tile ({}, {}) {:>3.0}%",
            progress.index,
            progress.total,
            progress.column,
            progress.row,
            progress.fraction() * 100.0
        ),
        DownloadPhase::Failed => println!(
            "  [{:>4}/{}] tile ({}, {}) failed",
            progress.index, progress.total, progress.column, progress.row
        ),
        DownloadPhase::Fetching => {}
    }
}

fn print_stage(stage: PipelineStage) {
    match stage {
        PipelineStage::Fetching => println!("Downloading tiles..."),
        PipelineStage::Composing => println!("Composing panorama..."),
        PipelineStage::Trimmed => println!("Trimmed padding, encoding..."),
        PipelineStage::Planned | PipelineStage::Encoded => {}
    }
}
