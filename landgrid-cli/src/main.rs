//! landgrid CLI - Command-line interface
//!
//! This binary provides a command-line interface to the landgrid library:
//! compositing satellite viewport images, tallying land-cover grid counts
//! over classified rasters, and exporting KML reports.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use landgrid::config::ConfigFile;
use landgrid::logging::{default_log_dir, default_log_file, init_logging};

#[derive(Parser)]
#[command(name = "landgrid")]
#[command(version = landgrid::VERSION)]
#[command(about = "Satellite viewport compositing and land-cover classification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and stitch a satellite viewport image
    Fetch(commands::fetch::FetchArgs),
    /// Tally per-class grid counts over a classified raster
    Classify(commands::classify::ClassifyArgs),
    /// Classify a raster and export a KML report
    Report(commands::report::ReportArgs),
}

fn main() {
    let cli = Cli::parse();

    let config = match ConfigFile::load() {
        Ok(config) => config,
        Err(e) => CliError::Config(e.to_string()).exit(),
    };

    let _guard = match init_logging(default_log_dir(), default_log_file(), &config.logging.level) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let result = match cli.command {
        Command::Fetch(args) => commands::fetch::run(args, &config),
        Command::Classify(args) => commands::classify::run(args, &config),
        Command::Report(args) => commands::report::run(args, &config),
    };

    if let Err(e) = result {
        e.exit();
    }
}
