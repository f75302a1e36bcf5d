//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator tile addresses as used by satellite imagery tile servers.

mod types;

pub use types::{
    CoordError, GeoCoordinate, TileAddress, DEFAULT_ZOOM, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT,
    MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Normalizes a requested zoom level.
///
/// Values inside [`MIN_ZOOM`]..=[`MAX_ZOOM`] pass through; anything else
/// falls back to [`DEFAULT_ZOOM`]. An out-of-range zoom is a recoverable
/// request error, not a failure.
#[inline]
pub fn normalize_zoom(requested: i64) -> u8 {
    if (MIN_ZOOM as i64..=MAX_ZOOM as i64).contains(&requested) {
        requested as u8
    } else {
        DEFAULT_ZOOM
    }
}

/// Converts a geographic coordinate to the tile address containing it.
///
/// Standard Web Mercator tiling with `n = 2^zoom` tiles per axis:
/// `col = floor((lon + 180) / 360 · n)` and
/// `row = floor((1 − asinh(tan(lat)) / π) / 2 · n)`.
///
/// Both indices are clamped into `[0, n-1]` so the result is a valid
/// address even at the ±180° meridian and the poles.
#[inline]
pub fn to_tile_address(coord: &GeoCoordinate, zoom: u8) -> TileAddress {
    let n = 2.0_f64.powi(zoom as i32);
    let max_index = n - 1.0;

    let col = ((coord.longitude() + 180.0) / 360.0 * n)
        .floor()
        .clamp(0.0, max_index) as u32;

    let lat_rad = coord.latitude() * PI / 180.0;
    let row = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n)
        .floor()
        .clamp(0.0, max_index) as u32;

    TileAddress { row, col, zoom }
}

/// Converts a tile address back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileAddress) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let lon = tile.col as f64 / n * 360.0 - 180.0;

    let y = tile.row as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}
