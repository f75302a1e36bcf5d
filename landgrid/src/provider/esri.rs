//! Esri World Imagery tile provider.
//!
//! Fetches satellite imagery from Esri's freely accessible World Imagery
//! map service. No API key or session setup is required.
//!
//! # API Endpoint
//!
//! `https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{zoom}/{row}/{col}`
//!
//! Note the path order: the Esri REST convention puts the row (y) before
//! the column (x), unlike the `{z}/{x}/{y}` scheme used by most XYZ tile
//! servers.

use crate::coord::{TileAddress, MAX_ZOOM, MIN_ZOOM};
use crate::provider::{HttpClient, ProviderError, TileProvider};

/// Default base URL for the World Imagery tile service.
const DEFAULT_BASE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile";

/// Attribution text required by the imagery terms of use.
const ATTRIBUTION: &str = "Esri World Imagery — Source: Esri, Maxar, Earthstar Geographics";

/// Esri World Imagery satellite tile provider.
///
/// # Example
///
/// ```no_run
/// use landgrid::provider::{EsriWorldImagery, ReqwestClient, TileProvider};
/// use landgrid::coord::TileAddress;
///
/// let client = ReqwestClient::new().unwrap();
/// let provider = EsriWorldImagery::new(client);
/// let tile = provider.fetch_tile(&TileAddress { row: 12665, col: 5241, zoom: 15 });
/// ```
pub struct EsriWorldImagery<C: HttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: HttpClient> EsriWorldImagery<C> {
    /// Creates a provider against the public World Imagery service.
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a provider against a custom base URL.
    ///
    /// Useful for self-hosted mirrors and for tests against a local server.
    /// A trailing slash on the base URL is tolerated.
    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http_client,
            base_url,
        }
    }

    /// Builds the tile URL for the given address.
    fn build_url(&self, address: &TileAddress) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url, address.zoom, address.row, address.col
        )
    }
}

impl<C: HttpClient> TileProvider for EsriWorldImagery<C> {
    fn fetch_tile(&self, address: &TileAddress) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(address.zoom) {
            return Err(ProviderError::UnsupportedZoom(address.zoom));
        }

        let max_index = address.max_index();
        if address.row > max_index || address.col > max_index {
            return Err(ProviderError::OutOfBounds {
                row: address.row,
                col: address.col,
                zoom: address.zoom,
            });
        }

        let url = self.build_url(address);
        self.http_client.get(&url)
    }

    fn name(&self) -> &str {
        "Esri World Imagery"
    }

    fn attribution(&self) -> &str {
        ATTRIBUTION
    }

    fn min_zoom(&self) -> u8 {
        MIN_ZOOM
    }

    fn max_zoom(&self) -> u8 {
        MAX_ZOOM
    }
}
