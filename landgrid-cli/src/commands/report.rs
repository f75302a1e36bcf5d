//! Report command - classify a raster and export a KML report.

use super::{load_raster, print_counts, resolve_palette};
use crate::error::CliError;
use clap::Args;
use landgrid::classify::{aggregate, classify};
use landgrid::config::ConfigFile;
use landgrid::coord::GeoCoordinate;
use landgrid::report::GeoReport;
use std::path::PathBuf;

/// Arguments for the report command.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Classified raster image path
    #[arg(long)]
    pub input: PathBuf,

    /// Latitude of the analyzed location in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Longitude of the analyzed location in decimal degrees
    #[arg(long)]
    pub lon: f64,

    /// Grid cell size in pixels
    #[arg(long)]
    pub grid_size: Option<u32>,

    /// Class palette as name=#RRGGBB,name=#RRGGBB,...
    #[arg(long)]
    pub classes: Option<String>,

    /// Imagery attribution text to include in the report
    #[arg(long)]
    pub attribution: Option<String>,

    /// Output KML path
    #[arg(long)]
    pub output: PathBuf,
}

/// Run the report command.
pub fn run(args: ReportArgs, config: &ConfigFile) -> Result<(), CliError> {
    let coordinate = GeoCoordinate::new(args.lat, args.lon)?;
    let palette = resolve_palette(args.classes.as_deref(), config)?;
    let grid_size = args.grid_size.unwrap_or(config.classification.grid_size);
    let raster = load_raster(&args.input)?;

    let counts = aggregate(classify(&raster, grid_size, &palette), &palette);

    let source_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());

    let mut report = GeoReport::new(coordinate, source_name, counts.clone(), palette.clone());
    if let Some(attribution) = &args.attribution {
        report = report.with_attribution(attribution.as_str());
    }
    report.write_kml(&args.output)?;

    print_counts(&counts, &palette);
    println!();
    println!("✓ Report written to {}", args.output.display());

    Ok(())
}
