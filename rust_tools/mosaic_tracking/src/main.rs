use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use mosaic_tracking::cli::Args;
use mosaic_tracking::config::RunConfig;
use mosaic_tracking::{pipeline, Result};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("=== Mosaic Tracking Extraction ===");

    if let Some(n_threads) = args.threads {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build_global()
        {
            Ok(()) => info!("Using {} threads", n_threads),
            Err(e) => warn!("Could not size thread pool ({}), using default", e),
        }
    }

    let config = RunConfig::from_args(&args)?;
    info!(
        "Mosaic {} in {} (range {}..={})",
        config.paths.mosaic_name,
        config.paths.input_dir.display(),
        config.low,
        config.high
    );

    let summary = pipeline::run(&config)?;

    info!(
        "Mapped {} images, {} features written to {}",
        summary.map.len(),
        summary.features,
        config.paths.dissolved.display()
    );
    info!("=== Done! ===");
    Ok(())
}
