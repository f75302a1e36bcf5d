//! Provider types and traits

use crate::coord::TileAddress;
use std::fmt;

/// Errors that can occur during tile fetch operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed
    HttpError(String),
    /// Tile address outside the valid range for its zoom level
    OutOfBounds { row: u32, col: u32, zoom: u8 },
    /// Zoom level not supported by this provider
    UnsupportedZoom(u8),
    /// Invalid response data from the tile server
    InvalidResponse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::OutOfBounds { row, col, zoom } => {
                write!(
                    f,
                    "Tile ({}, {}) outside the valid range at zoom {}",
                    row, col, zoom
                )
            }
            ProviderError::UnsupportedZoom(zoom) => {
                write!(f, "Zoom level {} not supported by provider", zoom)
            }
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Trait for map tile providers.
///
/// Implementors fetch single 256×256 raster tiles from an imagery source.
/// A fetch is one blocking request with no retry; all failure modes come
/// back as a [`ProviderError`] tagged with the offending address, never a
/// panic across this boundary.
pub trait TileProvider: Send + Sync {
    /// Fetches the encoded image bytes (PNG or JPEG) for one tile.
    fn fetch_tile(&self, address: &TileAddress) -> Result<Vec<u8>, ProviderError>;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;

    /// Returns the attribution text to embed in exported reports.
    fn attribution(&self) -> &str;

    /// Returns the minimum supported zoom level.
    fn min_zoom(&self) -> u8;

    /// Returns the maximum supported zoom level.
    fn max_zoom(&self) -> u8;

    /// Checks if this provider supports the given zoom level.
    fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }
}
