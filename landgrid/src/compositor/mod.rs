//! Viewport tile compositor.
//!
//! Builds a seamless satellite image for an arbitrary viewport by fetching
//! the covering Web Mercator tiles one at a time, pasting them onto a
//! stitched canvas, then cropping (and at world edges resampling) to the
//! exact requested window.
//!
//! Tiles that fail to fetch or decode leave their canvas region black and
//! never abort the composite; partial results degrade gracefully.
//!
//! # Example
//!
//! ```no_run
//! use landgrid::compositor::{TileCompositor, Viewport};
//! use landgrid::coord::GeoCoordinate;
//! use landgrid::provider::{EsriWorldImagery, ReqwestClient};
//!
//! let center = GeoCoordinate::new(37.7749, -122.4194)?;
//! let viewport = Viewport::new(center, 15, 1024, 768);
//!
//! let provider = EsriWorldImagery::new(ReqwestClient::new()?);
//! let compositor = TileCompositor::new(provider);
//! let result = compositor.produce(&viewport);
//! assert_eq!(result.image.dimensions(), (1024, 768));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::coord::{to_tile_address, GeoCoordinate, TileAddress};
use crate::provider::TileProvider;
use image::imageops::FilterType;
use image::{ImageReader, RgbImage};
use std::io::Cursor;
use tracing::{debug, warn};

/// Edge length of one map tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Extra tiles fetched beyond the viewport on each axis.
///
/// One tile of padding per edge absorbs the fractional-pixel offset between
/// the viewport window and the tile grid.
const PAD_TILES: u32 = 2;

/// The window to be rendered: a center coordinate, zoom level, and pixel
/// dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Geographic coordinate mapped to the output image center
    pub center: GeoCoordinate,
    /// Zoom level (normalized at construction)
    pub zoom: u8,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    ///
    /// The requested zoom is normalized into the valid range (out-of-range
    /// values fall back to the default). Zero dimensions are raised to one
    /// pixel so the output is always a real image.
    pub fn new(center: GeoCoordinate, requested_zoom: i64, width: u32, height: u32) -> Self {
        Self {
            center,
            zoom: crate::coord::normalize_zoom(requested_zoom),
            width: width.max(1),
            height: height.max(1),
        }
    }
}

/// Per-composite bookkeeping of how each grid slot was resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Tiles fetched and pasted successfully
    pub fetched: usize,
    /// Tiles whose fetch or decode failed (region left black)
    pub failed: usize,
    /// Grid slots outside the world at this zoom (never fetched)
    pub skipped: usize,
}

impl CompositeStats {
    /// Total number of grid slots in the composite.
    #[inline]
    pub fn total(&self) -> usize {
        self.fetched + self.failed + self.skipped
    }
}

/// A composited viewport image together with its fetch statistics.
#[derive(Debug, Clone)]
pub struct ViewportImage {
    /// Image of exactly the requested viewport dimensions
    pub image: RgbImage,
    /// How the covering tiles resolved
    pub stats: CompositeStats,
}

/// Stitches map tiles into exact-size viewport images.
///
/// Tiles are fetched strictly one at a time in grid-scan order; each
/// `produce` call owns its canvas, so separate calls are independent.
pub struct TileCompositor<P: TileProvider> {
    provider: P,
}

impl<P: TileProvider> TileCompositor<P> {
    /// Creates a compositor over the given tile provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Produces the image for a viewport.
    ///
    /// The output is always exactly `viewport.width × viewport.height`
    /// pixels, with the viewport's center coordinate at the image center.
    /// Regions whose tiles failed to fetch remain black.
    pub fn produce(&self, viewport: &Viewport) -> ViewportImage {
        let center = to_tile_address(&viewport.center, viewport.zoom);

        // Grid of tiles covering the viewport, padded one tile per edge.
        let tiles_x = viewport.width.div_ceil(TILE_SIZE) + PAD_TILES;
        let tiles_y = viewport.height.div_ceil(TILE_SIZE) + PAD_TILES;

        let start_col = center.col.saturating_sub(tiles_x / 2);
        let start_row = center.row.saturating_sub(tiles_y / 2);

        let mut canvas = RgbImage::new(tiles_x * TILE_SIZE, tiles_y * TILE_SIZE);
        let mut stats = CompositeStats::default();
        let max_index = center.max_index();

        for dy in 0..tiles_y {
            for dx in 0..tiles_x {
                let col = start_col + dx;
                let row = start_row + dy;

                // Slots beyond the edge of the world stay black.
                if col > max_index || row > max_index {
                    stats.skipped += 1;
                    continue;
                }

                let address = TileAddress {
                    row,
                    col,
                    zoom: viewport.zoom,
                };

                match self.fetch_and_decode(&address) {
                    Ok(tile) => {
                        paste_tile(&mut canvas, &tile, dx * TILE_SIZE, dy * TILE_SIZE);
                        stats.fetched += 1;
                    }
                    Err(reason) => {
                        warn!(
                            tile = %address,
                            error = %reason,
                            "Tile unavailable, leaving region blank"
                        );
                        stats.failed += 1;
                    }
                }
            }
        }

        // Pixel location of the viewport center within the stitched canvas:
        // the middle of the center tile.
        let center_px_x = (center.col - start_col) * TILE_SIZE + TILE_SIZE / 2;
        let center_px_y = (center.row - start_row) * TILE_SIZE + TILE_SIZE / 2;

        let image = crop_centered(
            &canvas,
            center_px_x,
            center_px_y,
            viewport.width,
            viewport.height,
        );

        debug!(
            zoom = viewport.zoom,
            width = viewport.width,
            height = viewport.height,
            fetched = stats.fetched,
            failed = stats.failed,
            skipped = stats.skipped,
            "Composite complete"
        );

        ViewportImage { image, stats }
    }

    fn fetch_and_decode(&self, address: &TileAddress) -> Result<RgbImage, String> {
        let bytes = self
            .provider
            .fetch_tile(address)
            .map_err(|e| e.to_string())?;

        let img = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| format!("format detection failed: {}", e))?
            .decode()
            .map_err(|e| format!("image decode failed: {}", e))?;

        Ok(img.to_rgb8())
    }
}

/// Places a tile image onto the canvas at the specified offset.
fn paste_tile(canvas: &mut RgbImage, tile: &RgbImage, x_offset: u32, y_offset: u32) {
    // Guard against tiles that are not exactly 256×256.
    let width = tile.width().min(TILE_SIZE).min(canvas.width() - x_offset);
    let height = tile.height().min(TILE_SIZE).min(canvas.height() - y_offset);

    for y in 0..height {
        for x in 0..width {
            let pixel = tile.get_pixel(x, y);
            canvas.put_pixel(x_offset + x, y_offset + y, *pixel);
        }
    }
}

/// Crops a `width × height` window centered at `(center_x, center_y)`,
/// clamped to the canvas bounds.
///
/// When clamping shrinks the window (possible only at the edge of the
/// world), the crop is resampled back up to the requested size.
fn crop_centered(
    canvas: &RgbImage,
    center_x: u32,
    center_y: u32,
    width: u32,
    height: u32,
) -> RgbImage {
    let left = center_x.saturating_sub(width / 2);
    let top = center_y.saturating_sub(height / 2);
    let right = (left + width).min(canvas.width());
    let bottom = (top + height).min(canvas.height());

    let cropped = image::imageops::crop_imm(canvas, left, top, right - left, bottom - top).to_image();

    if cropped.dimensions() == (width, height) {
        cropped
    } else {
        image::imageops::resize(&cropped, width, height, FilterType::Lanczos3)
    }
}

/// Splits an image into its four quadrants: top-left, top-right,
/// bottom-left, bottom-right.
///
/// Left and top halves take `floor(dim / 2)` pixels; right and bottom
/// halves take the remainder, so odd dimensions lose nothing.
pub fn split_quadrants(image: &RgbImage) -> [RgbImage; 4] {
    let (width, height) = image.dimensions();
    let half_w = width / 2;
    let half_h = height / 2;

    let crop = |x, y, w, h| image::imageops::crop_imm(image, x, y, w, h).to_image();

    [
        crop(0, 0, half_w, half_h),
        crop(half_w, 0, width - half_w, half_h),
        crop(0, half_h, half_w, height - half_h),
        crop(half_w, half_h, width - half_w, height - half_h),
    ]
}
