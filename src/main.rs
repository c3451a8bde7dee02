//! stylecam CLI - apply a pre-trained style model to a photo.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stylecam::{Config, IdentityBackend, Pipeline};

/// Apply a pre-trained style transfer model to a photo.
#[derive(Parser, Debug)]
#[command(name = "stylecam")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output image path.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Directory holding bundled model assets.
    #[arg(long, default_value = "assets", value_name = "DIR")]
    assets_dir: PathBuf,

    /// Model asset file name.
    #[arg(short, long, default_value = stylecam::model::DEFAULT_MODEL, value_name = "NAME")]
    model: String,

    /// Output width. Defaults to the upright input width.
    #[arg(long, value_name = "INT", requires = "height")]
    width: Option<u32>,

    /// Output height. Defaults to the upright input height.
    #[arg(long, value_name = "INT", requires = "width")]
    height: Option<u32>,

    /// Output JPEG quality (1-100).
    #[arg(short, long, default_value = "95", value_name = "INT")]
    quality: u8,

    /// Skip the model and pass tensors through unchanged.
    #[arg(long)]
    passthrough: bool,

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
                .unwrap_or_else(|_| format!("stylecam={log_level}").into()),
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
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let config = Config {
        model_name: args.model.clone(),
        assets_dir: args.assets_dir.clone(),
        output_quality: args.quality,
        ..Config::default()
    };

    let mut pipeline = if args.passthrough {
        Pipeline::with_backend(config, Box::new(IdentityBackend))
    } else {
        Pipeline::new(config)
    }
    .context("Failed to initialize pipeline")?;

    let target = args.width.zip(args.height);

    pipeline
        .process(&args.input, &args.output, target)
        .context("Failed to process image")?;

    println!(
        "Successfully processed {} -> {}",
        args.input.display(),
        args.output.display()
    );

    Ok(())
}
