//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use landgrid::classify::PaletteError;
use landgrid::coord::CoordError;
use landgrid::provider::ProviderError;
use landgrid::report::ExportError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Coordinate out of range
    InvalidCoordinate(CoordError),
    /// Palette specification could not be parsed
    Palette(PaletteError),
    /// Failed to create the HTTP client or provider
    Provider(ProviderError),
    /// Failed to read an input image
    ImageRead { path: String, error: String },
    /// Failed to write an output image
    ImageWrite { path: String, error: String },
    /// Failed to export the report
    Export(ExportError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::InvalidCoordinate(_) = self {
            eprintln!();
            eprintln!("Latitude must be between -90 and 90, longitude between -180 and 180.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidCoordinate(e) => write!(f, "{}", e),
            CliError::Palette(e) => write!(f, "{}", e),
            CliError::Provider(e) => write!(f, "Provider error: {}", e),
            CliError::ImageRead { path, error } => {
                write!(f, "Failed to read image '{}': {}", path, error)
            }
            CliError::ImageWrite { path, error } => {
                write!(f, "Failed to write image '{}': {}", path, error)
            }
            CliError::Export(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidCoordinate(e) => Some(e),
            CliError::Palette(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Export(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::InvalidCoordinate(e)
    }
}

impl From<PaletteError> for CliError {
    fn from(e: PaletteError) -> Self {
        CliError::Palette(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}
