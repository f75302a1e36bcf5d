//! Grid-cell classification of a classified raster.
//!
//! Partitions a raster into fixed-size square cells, reduces each cell to
//! its mean color, and labels it with the nearest palette class. Cells are
//! yielded lazily in row-major order; a malformed cell is skipped with a
//! warning and never aborts the scan.

use super::palette::ClassPalette;
use image::RgbImage;
use tracing::warn;

/// One classified grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Cell column in the grid (0 at the left)
    pub grid_col: u32,
    /// Cell row in the grid (0 at the top)
    pub grid_row: u32,
    /// Pixel x of the cell's top-left corner
    pub x: u32,
    /// Pixel y of the cell's top-left corner
    pub y: u32,
    /// Cell width in pixels (trailing cells may be narrower)
    pub width: u32,
    /// Cell height in pixels (trailing cells may be shorter)
    pub height: u32,
    /// Arithmetic mean RGB over the cell's pixels
    pub mean_color: [f64; 3],
    /// Index of the assigned class in the palette
    pub class_index: usize,
    /// Name of the assigned class
    pub label: String,
}

/// Classifies a raster into grid cells.
///
/// Returns a lazy iterator scanning non-overlapping `grid_size × grid_size`
/// blocks in row-major order. Incomplete trailing blocks at the raster
/// edges are classified from whatever pixels remain. A fresh call restarts
/// the scan from the first block.
///
/// A `grid_size` of zero is raised to one pixel.
pub fn classify<'a>(
    raster: &'a RgbImage,
    grid_size: u32,
    palette: &'a ClassPalette,
) -> GridCells<'a> {
    let grid_size = grid_size.max(1);
    GridCells {
        raster,
        palette,
        grid_size,
        cols: raster.width().div_ceil(grid_size),
        rows: raster.height().div_ceil(grid_size),
        next: 0,
    }
}

/// Lazy iterator over classified grid cells.
#[derive(Debug, Clone)]
pub struct GridCells<'a> {
    raster: &'a RgbImage,
    palette: &'a ClassPalette,
    grid_size: u32,
    cols: u32,
    rows: u32,
    next: u64,
}

impl GridCells<'_> {
    /// Grid dimensions as (columns, rows).
    #[inline]
    pub fn grid_dimensions(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }
}

impl Iterator for GridCells<'_> {
    type Item = GridCell;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.cols as u64 * self.rows as u64;

        while self.next < total {
            let index = self.next;
            self.next += 1;

            let grid_col = (index % self.cols as u64) as u32;
            let grid_row = (index / self.cols as u64) as u32;
            let x = grid_col * self.grid_size;
            let y = grid_row * self.grid_size;
            let width = self.grid_size.min(self.raster.width() - x);
            let height = self.grid_size.min(self.raster.height() - y);

            let Some(mean_color) = mean_color(self.raster, x, y, width, height) else {
                warn!(
                    grid_col,
                    grid_row, "Skipping malformed grid cell with no pixels"
                );
                continue;
            };

            let Some((class_index, entry)) = self.palette.nearest(mean_color) else {
                warn!(
                    grid_col,
                    grid_row, "Skipping grid cell: no palette class to assign"
                );
                continue;
            };

            return Some(GridCell {
                grid_col,
                grid_row,
                x,
                y,
                width,
                height,
                mean_color,
                class_index,
                label: entry.name.clone(),
            });
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.cols as u64 * self.rows as u64;
        let remaining = total.saturating_sub(self.next) as usize;
        // Skipped cells make the exact count unknowable up front.
        (0, Some(remaining))
    }
}

/// Arithmetic mean RGB over a pixel rectangle, or `None` for an empty one.
fn mean_color(raster: &RgbImage, x: u32, y: u32, width: u32, height: u32) -> Option<[f64; 3]> {
    let count = width as u64 * height as u64;
    if count == 0 {
        return None;
    }

    let mut sums = [0.0f64; 3];
    for dy in 0..height {
        for dx in 0..width {
            let pixel = raster.get_pixel(x + dx, y + dy);
            for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += channel as f64;
            }
        }
    }

    Some(sums.map(|s| s / count as f64))
}
