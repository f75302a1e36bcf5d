//! Classify command - tally per-class grid counts over a classified raster.

use super::{load_raster, print_counts, resolve_palette};
use crate::error::CliError;
use clap::Args;
use landgrid::classify::{aggregate, classify};
use landgrid::config::ConfigFile;
use std::path::PathBuf;

/// Arguments for the classify command.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Classified raster image path
    #[arg(long)]
    pub input: PathBuf,

    /// Grid cell size in pixels
    #[arg(long)]
    pub grid_size: Option<u32>,

    /// Class palette as name=#RRGGBB,name=#RRGGBB,...
    #[arg(long)]
    pub classes: Option<String>,
}

/// Run the classify command.
pub fn run(args: ClassifyArgs, config: &ConfigFile) -> Result<(), CliError> {
    let palette = resolve_palette(args.classes.as_deref(), config)?;
    let grid_size = args.grid_size.unwrap_or(config.classification.grid_size);
    let raster = load_raster(&args.input)?;

    let cells = classify(&raster, grid_size, &palette);
    let (cols, rows) = cells.grid_dimensions();
    let counts = aggregate(cells, &palette);

    println!(
        "{} — {}×{} px, {}×{} grid of {} px cells",
        args.input.display(),
        raster.width(),
        raster.height(),
        cols,
        rows,
        grid_size,
    );
    println!();
    print_counts(&counts, &palette);

    Ok(())
}
