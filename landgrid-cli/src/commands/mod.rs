//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and a
//! `run` handler:
//!
//! - [`fetch`] - Composite a satellite viewport image
//! - [`classify`] - Tally per-class grid counts over a classified raster
//! - [`report`] - Classify and export a KML report

pub mod classify;
pub mod fetch;
pub mod report;

use crate::error::CliError;
use landgrid::classify::{ClassCounts, ClassPalette};
use landgrid::config::ConfigFile;
use std::path::Path;

/// Resolves the class palette: CLI flag first, then config, then the
/// built-in land-cover palette.
pub(crate) fn resolve_palette(
    cli_spec: Option<&str>,
    config: &ConfigFile,
) -> Result<ClassPalette, CliError> {
    if let Some(spec) = cli_spec {
        return Ok(ClassPalette::parse_list(spec)?);
    }
    if let Some(spec) = &config.classification.classes {
        return Ok(ClassPalette::parse_list(spec)?);
    }
    Ok(ClassPalette::land_cover())
}

/// Loads an image file as an RGB raster.
pub(crate) fn load_raster(path: &Path) -> Result<image::RgbImage, CliError> {
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| CliError::ImageRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })
}

/// Prints a per-class counts table with color swatches.
pub(crate) fn print_counts(counts: &ClassCounts, palette: &ClassPalette) {
    println!("{:<16} {:>8}  {}", "Class", "Grids", "Color");
    for (name, count) in counts.iter() {
        println!("{:<16} {:>8}  {}", name, count, palette.hex_swatch(name));
    }
    println!("{:<16} {:>8}", "Total", counts.total());
}
