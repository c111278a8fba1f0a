//! `blackdrop` CLI - Turn near-black pixels transparent across a folder of images.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blackdrop::{Config, Pipeline};

/// Convert near-black pixels to full transparency for every image in a folder.
#[derive(Parser, Debug)]
#[command(name = "blackdrop")]
#[command(version, about, long_about = None)]
struct Args {
    /// Folder containing the input images (.jpg, .jpeg, .png).
    #[arg(value_name = "INPUT_DIR")]
    input: PathBuf,

    /// Folder to write the processed images to. Created if missing.
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,

    /// Near-black cutoff (0-255). Pixels strictly below it turn transparent.
    #[arg(short, long, default_value = "40", value_name = "INT")]
    threshold: u8,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("blackdrop={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    if !args.input.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", args.input.display());
    }

    let config = Config {
        threshold: args.threshold,
    };

    let pipeline = Pipeline::new(config);

    let summary = pipeline
        .run(&args.input, &args.output)
        .context("Failed to process images")?;

    println!(
        "Images processed successfully! ({} converted, {} passed through, {} skipped)",
        summary.processed, summary.passed_through, summary.skipped
    );

    Ok(())
}
