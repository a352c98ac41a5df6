//! upscale - GPU image upscaler CLI.
//!
//! Reads an image, upscales it by an integer factor on the GPU with the
//! requested resampling method, and writes the result next to the current
//! working directory in the original container format.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use upscale_gpu::{Method, Upscaler};

mod paths;

#[derive(Parser)]
#[command(name = "upscale")]
#[command(author, version, about = "GPU image upscaler")]
#[command(long_about = "
Upscales a raster image by an integer factor using a GPU compute pipeline.

Examples:
  upscale -i photo.png -s 2                 # bicubic (default), 2x
  upscale -i photo.png -s 3 -m nearest      # nearest-neighbor, 3x
  upscale -i ~/shots/frame.jpg -s 2 -m lanczos

The output is written to the working directory as
{method}_scaled_{N}x_{input-path}.
")]
struct Cli {
    /// Input file
    #[arg(short, long = "input-file")]
    input_file: String,

    /// Desired scale (positive integer; 1 is a legal identity resize)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Valid options are 'bilinear', 'bicubic', 'nearest', and 'lanczos'.
    /// Defaults to 'bicubic'
    #[arg(short, long)]
    method: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let method = Method::parse(cli.method.as_deref());
    let input_path = paths::expand_tilde(&cli.input_file);

    // Input is read before any GPU resource is touched, so an unreadable
    // path never allocates device work.
    let image = upscale_io::read(&input_path)
        .with_context(|| format!("failed to read {}", input_path.display()))?;

    let upscaler = Upscaler::new().context("failed to initialize GPU device")?;
    info!(device = upscaler.context().device_name(), backend = ?upscaler.context().adapter_info().backend, "selected adapter");

    let output = upscaler
        .upscale(&image, cli.scale, method)
        .context("upscale dispatch failed")?;

    let out_name = paths::output_name(cli.method.as_deref(), cli.scale, &cli.input_file);
    upscale_io::write(&out_name, &output)
        .with_context(|| format!("failed to write {out_name}"))?;

    info!(output = %out_name, "done");
    Ok(())
}
