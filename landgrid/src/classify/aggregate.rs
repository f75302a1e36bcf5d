//! Per-class tallies of classified grid cells.

use super::grid::GridCell;
use super::palette::ClassPalette;

/// Class name → cell count, preserving palette order.
///
/// The total equals the number of successfully classified cells; cells
/// skipped during classification are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassCounts {
    entries: Vec<(String, u64)>,
}

impl ClassCounts {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tally with every palette class initialized to zero, in
    /// palette order.
    pub fn zeroed(palette: &ClassPalette) -> Self {
        Self {
            entries: palette
                .entries()
                .iter()
                .map(|e| (e.name.clone(), 0))
                .collect(),
        }
    }

    /// Increments the count for a class, adding the entry if it is new.
    pub fn increment(&mut self, name: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((name.to_string(), 1)),
        }
    }

    /// Count for the named class (zero when absent).
    pub fn get(&self, name: &str) -> u64 {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Iterates entries in insertion (palette) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct classes tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no classes are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tallies classified cells into per-class counts.
///
/// Every class known to the palette starts at zero, so report consumers
/// always see the full class list; the matching entry is incremented for
/// each cell. A pure fold with no state beyond the output map.
pub fn aggregate<I>(cells: I, palette: &ClassPalette) -> ClassCounts
where
    I: IntoIterator<Item = GridCell>,
{
    let mut counts = ClassCounts::zeroed(palette);
    for cell in cells {
        counts.increment(&cell.label);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use image::{Rgb, RgbImage};

    fn water_land_palette() -> ClassPalette {
        ClassPalette::from_parts(
            &["water".to_string(), "land".to_string()],
            &[[0, 0, 255], [0, 255, 0]],
        )
    }

    #[test]
    fn test_zeroed_covers_all_palette_classes() {
        let counts = ClassCounts::zeroed(&water_land_palette());
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("water"), 0);
        assert_eq!(counts.get("land"), 0);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_increment_and_get() {
        let mut counts = ClassCounts::new();
        counts.increment("water");
        counts.increment("water");
        counts.increment("land");

        assert_eq!(counts.get("water"), 2);
        assert_eq!(counts.get("land"), 1);
        assert_eq!(counts.get("lava"), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_iteration_preserves_palette_order() {
        let mut counts = ClassCounts::zeroed(&water_land_palette());
        counts.increment("land");

        let entries: Vec<_> = counts.iter().collect();
        assert_eq!(entries, vec![("water", 0), ("land", 1)]);
    }

    #[test]
    fn test_aggregate_counts_every_cell() {
        // 32×16 at grid 16: left cell painted blue, right cell green.
        let mut raster = RgbImage::new(32, 16);
        for y in 0..16 {
            for x in 0..16 {
                raster.put_pixel(x, y, Rgb([0, 0, 255]));
                raster.put_pixel(x + 16, y, Rgb([0, 255, 0]));
            }
        }
        let palette = water_land_palette();
        let counts = aggregate(classify(&raster, 16, &palette), &palette);

        assert_eq!(counts.get("water"), 1);
        assert_eq!(counts.get("land"), 1);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_aggregate_total_equals_cell_count() {
        let raster = RgbImage::from_pixel(70, 50, Rgb([0, 0, 255]));
        let palette = water_land_palette();
        let counts = aggregate(classify(&raster, 16, &palette), &palette);
        // ceil(70/16) * ceil(50/16) = 5 * 4
        assert_eq!(counts.total(), 20);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let mut raster = RgbImage::new(48, 48);
        for (x, y, pixel) in raster.enumerate_pixels_mut() {
            *pixel = if (x + y) % 3 == 0 {
                Rgb([0, 30, 240])
            } else {
                Rgb([20, 230, 10])
            };
        }
        let palette = water_land_palette();

        let first = aggregate(classify(&raster, 16, &palette), &palette);
        let second = aggregate(classify(&raster, 16, &palette), &palette);
        assert_eq!(first, second);
    }

    #[test]
    fn test_aggregate_empty_palette() {
        let raster = RgbImage::new(32, 32);
        let palette = ClassPalette::default();
        let counts = aggregate(classify(&raster, 16, &palette), &palette);
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
    }
}
