//! Fetch command - composite a satellite viewport image to a file.

use crate::error::CliError;
use clap::Args;
use landgrid::compositor::{TileCompositor, Viewport};
use landgrid::config::ConfigFile;
use landgrid::coord::GeoCoordinate;
use landgrid::provider::{EsriWorldImagery, ReqwestClient, TileProvider};
use std::path::PathBuf;

/// Arguments for the fetch command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Latitude in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long)]
    pub lon: f64,

    /// Zoom level (1-20; anything else falls back to the default)
    #[arg(long)]
    pub zoom: Option<i64>,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Output image path (format from extension: .png, .jpg, ...)
    #[arg(long)]
    pub output: PathBuf,
}

/// Run the fetch command.
pub fn run(args: FetchArgs, config: &ConfigFile) -> Result<(), CliError> {
    let center = GeoCoordinate::new(args.lat, args.lon)?;
    let viewport = Viewport::new(
        center,
        args.zoom.unwrap_or(config.viewport.zoom as i64),
        args.width.unwrap_or(config.viewport.width),
        args.height.unwrap_or(config.viewport.height),
    );

    let client =
        ReqwestClient::with_timeout(config.provider.timeout).map_err(CliError::Provider)?;
    let provider = EsriWorldImagery::with_base_url(client, config.provider.base_url.as_str());
    let attribution = provider.attribution().to_string();
    let compositor = TileCompositor::new(provider);

    println!("Fetching viewport:");
    println!("  Location: {}", viewport.center);
    println!("  Zoom: {}", viewport.zoom);
    println!("  Size: {}×{}", viewport.width, viewport.height);
    println!();

    let start = std::time::Instant::now();
    let result = compositor.produce(&viewport);
    let elapsed = start.elapsed();

    result
        .image
        .save(&args.output)
        .map_err(|e| CliError::ImageWrite {
            path: args.output.display().to_string(),
            error: e.to_string(),
        })?;

    println!(
        "✓ Saved {} in {:.2}s ({} tiles fetched, {} failed, {} outside the world)",
        args.output.display(),
        elapsed.as_secs_f64(),
        result.stats.fetched,
        result.stats.failed,
        result.stats.skipped,
    );
    println!("  Imagery: {}", attribution);

    Ok(())
}
