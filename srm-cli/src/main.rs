//! Command-line interface for srm-core
//!
//! Thin wrapper around the segmentation engine: decode a raster, run
//! `segment()`, encode the result. No algorithmic logic lives here.

mod volume_io;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use srm_core::{segment, Raster, SegmentConfig, Shape};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "srm")]
#[command(about = "Statistical Region Merging segmentation CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write run statistics as JSON to this path
    #[arg(long, global = true)]
    stats: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a 2D image
    Segment {
        /// Input image file (any format the `image` crate decodes)
        input: PathBuf,

        /// Output image file
        output: PathBuf,

        /// Coarseness parameter; larger Q yields finer segmentation
        #[arg(short, long)]
        q: f64,

        /// Intensity bit depth to segment at (8 or 16)
        #[arg(long, default_value = "8")]
        bit_depth: u8,
    },

    /// Segment a 3D volume stored in the raw little-endian volume format
    SegmentVolume {
        /// Input volume file
        input: PathBuf,

        /// Output volume file
        output: PathBuf,

        /// Coarseness parameter; larger Q yields finer segmentation
        #[arg(short, long)]
        q: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Segment { input, output, q, bit_depth } => {
            segment_command(input, output, q, bit_depth, cli.stats)
        }
        Commands::SegmentVolume { input, output, q } => {
            segment_volume_command(input, output, q, cli.stats)
        }
    }
}

fn segment_command(
    input: PathBuf,
    output: PathBuf,
    q: f64,
    bit_depth: u8,
    stats_path: Option<PathBuf>,
) -> Result<()> {
    let config = SegmentConfig::new(q).context("Invalid Q")?;
    match bit_depth {
        8 => segment_2d_u8(&input, &output, &config, stats_path),
        16 => segment_2d_u16(&input, &output, &config, stats_path),
        other => bail!("unsupported bit depth for segment: {other} (supported: 8, 16)"),
    }
}

fn segment_2d_u8(input: &Path, output: &Path, config: &SegmentConfig, stats_path: Option<PathBuf>) -> Result<()> {
    log::info!("Loading image: {}", input.display());
    let img = image::open(input)
        .with_context(|| format!("Failed to open image: {}", input.display()))?
        .to_luma8();
    let (width, height) = img.dimensions();
    let shape = Shape::Two { width: width as usize, height: height as usize };
    let raster = Raster::<u8>::new(shape, img.into_raw())
        .context("Decoded image did not match its own reported dimensions")?;

    log::info!("Segmenting {width}x{height} 8-bit image with Q={}", config.q);
    let outcome = segment(&raster, config).context("Segmentation failed")?;

    let out_img =
        image::GrayImage::from_raw(width, height, outcome.output.into_data()).expect("shape preserved by segment()");
    out_img
        .save(output)
        .with_context(|| format!("Failed to write output image: {}", output.display()))?;
    log::info!("Output saved to: {}", output.display());

    write_stats(stats_path, &outcome.stats)
}

fn segment_2d_u16(input: &Path, output: &Path, config: &SegmentConfig, stats_path: Option<PathBuf>) -> Result<()> {
    log::info!("Loading image: {}", input.display());
    let img = image::open(input)
        .with_context(|| format!("Failed to open image: {}", input.display()))?
        .to_luma16();
    let (width, height) = img.dimensions();
    let shape = Shape::Two { width: width as usize, height: height as usize };
    let raster = Raster::<u16>::new(shape, img.into_raw())
        .context("Decoded image did not match its own reported dimensions")?;

    log::info!("Segmenting {width}x{height} 16-bit image with Q={}", config.q);
    let outcome = segment(&raster, config).context("Segmentation failed")?;

    let out_img = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(width, height, outcome.output.into_data())
        .expect("shape preserved by segment()");
    out_img
        .save(output)
        .with_context(|| format!("Failed to write output image: {}", output.display()))?;
    log::info!("Output saved to: {}", output.display());

    write_stats(stats_path, &outcome.stats)
}

fn segment_volume_command(input: PathBuf, output: PathBuf, q: f64, stats_path: Option<PathBuf>) -> Result<()> {
    log::info!("Loading volume: {}", input.display());
    let volume = volume_io::read_volume(&input)
        .with_context(|| format!("Failed to read volume: {}", input.display()))?;

    let config = SegmentConfig::new(q).context("Invalid Q")?;
    log::info!(
        "Segmenting {}x{}x{} volume with Q={q}",
        volume.shape().width(),
        volume.shape().height(),
        volume.shape().depth().unwrap_or(1)
    );

    let outcome = segment(&volume, &config).context("Segmentation failed")?;

    volume_io::write_volume(&output, &outcome.output)
        .with_context(|| format!("Failed to write volume: {}", output.display()))?;
    log::info!("Output saved to: {}", output.display());

    write_stats(stats_path, &outcome.stats)
}

fn write_stats(path: Option<PathBuf>, stats: &srm_core::RunStats) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(stats).context("Failed to serialize run statistics")?;
    fs::write(&path, json).with_context(|| format!("Failed to write stats to: {}", path.display()))?;
    log::info!("Run statistics saved to: {}", path.display());
    Ok(())
}
