//! Grid-based land-cover classification.
//!
//! Consumes a classified raster produced by an external model and reduces
//! it to per-class statistics:
//!
//! - [`ClassPalette`] — the model's ordered class name/color mapping
//! - [`classify`] — lazy row-major scan of grid cells, each labeled with
//!   its nearest palette class
//! - [`aggregate`] — fold of classified cells into [`ClassCounts`]

mod aggregate;
mod grid;
mod palette;

pub use aggregate::{aggregate, ClassCounts};
pub use grid::{classify, GridCell, GridCells};
pub use palette::{ClassPalette, PaletteEntry, PaletteError, FALLBACK_SWATCH};
