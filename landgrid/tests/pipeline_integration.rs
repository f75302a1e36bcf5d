//! End-to-end pipeline integration tests.
//!
//! Exercises the public API the way an application would: a mock tile
//! provider stands in for the network, a quantizing mock classifier stands
//! in for the external model, and the full fetch → stitch → classify →
//! aggregate → export pass runs against them.

use image::{Rgb, RgbImage};
use landgrid::classify::{aggregate, classify, ClassPalette};
use landgrid::compositor::{TileCompositor, Viewport};
use landgrid::coord::{GeoCoordinate, TileAddress};
use landgrid::pipeline::{self, ClassifierError, ImageClassifier};
use landgrid::provider::{ProviderError, TileProvider};
use landgrid::report::GeoReport;
use std::io::Cursor;
use std::path::Path;

fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .expect("PNG encoding failed");
    buffer.into_inner()
}

/// Tile provider that splits the world at the prime meridian: tiles in the
/// western half are blue (water), tiles in the eastern half green (land).
struct HemisphereProvider;

impl TileProvider for HemisphereProvider {
    fn fetch_tile(&self, address: &TileAddress) -> Result<Vec<u8>, ProviderError> {
        let half = (address.max_index() + 1) / 2;
        let color = if address.col < half {
            Rgb([0, 0, 255])
        } else {
            Rgb([0, 255, 0])
        };
        Ok(encode_png(&RgbImage::from_pixel(256, 256, color)))
    }

    fn name(&self) -> &str {
        "hemisphere"
    }

    fn attribution(&self) -> &str {
        "Hemisphere test imagery"
    }

    fn min_zoom(&self) -> u8 {
        1
    }

    fn max_zoom(&self) -> u8 {
        20
    }
}

/// Provider that refuses every request, simulating a network outage.
struct OfflineProvider;

impl TileProvider for OfflineProvider {
    fn fetch_tile(&self, _address: &TileAddress) -> Result<Vec<u8>, ProviderError> {
        Err(ProviderError::HttpError("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "offline"
    }

    fn attribution(&self) -> &str {
        "none"
    }

    fn min_zoom(&self) -> u8 {
        1
    }

    fn max_zoom(&self) -> u8 {
        20
    }
}

/// Mock model that quantizes every pixel to the nearest palette color.
struct QuantizingClassifier {
    names: Vec<String>,
    colors: Vec<[u8; 3]>,
    grid: u32,
}

impl QuantizingClassifier {
    fn water_land(grid: u32) -> Self {
        Self {
            names: vec!["water".to_string(), "land".to_string()],
            colors: vec![[0, 0, 255], [0, 255, 0]],
            grid,
        }
    }
}

impl ImageClassifier for QuantizingClassifier {
    fn process_image(&self, path: &Path) -> Result<(RgbImage, RgbImage), ClassifierError> {
        let original = image::open(path)
            .map_err(|e| ClassifierError(e.to_string()))?
            .to_rgb8();

        let palette = self.palette();
        let mut classified = original.clone();
        for pixel in classified.pixels_mut() {
            let [r, g, b] = pixel.0;
            if let Some((_, entry)) = palette.nearest([r as f64, g as f64, b as f64]) {
                pixel.0 = entry.color;
            }
        }
        Ok((original, classified))
    }

    fn class_names(&self) -> &[String] {
        &self.names
    }

    fn class_colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    fn grid_size(&self) -> u32 {
        self.grid
    }
}

#[test]
fn full_pipeline_over_western_hemisphere_counts_water() {
    // A viewport centered well inside the western hemisphere sees only
    // blue tiles, so every grid cell must count as water.
    let center = GeoCoordinate::new(37.7749, -122.4194).unwrap();
    let viewport = Viewport::new(center, 10, 256, 192);
    let compositor = TileCompositor::new(HemisphereProvider);
    let classifier = QuantizingClassifier::water_land(32);

    let output = pipeline::run(&compositor, &classifier, &viewport).unwrap();

    let cells = (256u32.div_ceil(32) * 192u32.div_ceil(32)) as u64;
    assert_eq!(output.counts.get("water"), cells);
    assert_eq!(output.counts.get("land"), 0);
    assert_eq!(output.counts.total(), cells);
    assert_eq!(output.viewport_image.dimensions(), (256, 192));
}

#[test]
fn full_pipeline_over_eastern_hemisphere_counts_land() {
    let center = GeoCoordinate::new(48.8566, 2.3522).unwrap(); // Paris
    let viewport = Viewport::new(center, 10, 192, 192);
    let compositor = TileCompositor::new(HemisphereProvider);
    let classifier = QuantizingClassifier::water_land(32);

    let output = pipeline::run(&compositor, &classifier, &viewport).unwrap();

    assert_eq!(output.counts.get("water"), 0);
    assert!(output.counts.get("land") > 0);
}

#[test]
fn pipeline_survives_total_network_outage() {
    // Every fetch fails: the composite degrades to an all-black image and
    // the classifier still runs over it, yielding a full (if meaningless)
    // tally rather than an aborted pipeline.
    let center = GeoCoordinate::new(0.0, 0.0).unwrap();
    let viewport = Viewport::new(center, 12, 128, 128);
    let compositor = TileCompositor::new(OfflineProvider);
    let classifier = QuantizingClassifier::water_land(32);

    let output = pipeline::run(&compositor, &classifier, &viewport).unwrap();

    assert_eq!(output.stats.fetched, 0);
    assert!(output.stats.failed > 0);
    assert_eq!(output.viewport_image.dimensions(), (128, 128));
    assert_eq!(output.counts.total(), 16);
}

#[test]
fn background_invocation_exports_report() {
    let center = GeoCoordinate::new(37.7749, -122.4194).unwrap();
    let viewport = Viewport::new(center, 10, 128, 128);
    let compositor = TileCompositor::new(HemisphereProvider);
    let classifier = QuantizingClassifier::water_land(32);

    let handle = pipeline::spawn(compositor, classifier, viewport);
    let output = handle.join().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classification.kml");
    output
        .to_report(Some("Hemisphere test imagery"))
        .write_kml(&path)
        .unwrap();

    let kml = std::fs::read_to_string(&path).unwrap();
    assert!(kml.contains("<coordinates>-122.4194,37.7749,0</coordinates>"));
    assert!(kml.contains("water: 16 grids"));
    assert!(kml.contains("Hemisphere test imagery"));
}

#[test]
fn quadrant_analysis_matches_whole_image_tally() {
    let classifier = QuantizingClassifier::water_land(16);

    // Left half water-colored, right half land-colored.
    let mut image = RgbImage::new(64, 64);
    for (x, _, pixel) in image.enumerate_pixels_mut() {
        *pixel = if x < 32 {
            Rgb([10, 10, 245])
        } else {
            Rgb([10, 245, 10])
        };
    }

    let analyses = pipeline::classify_quadrants(&image, &classifier);
    assert_eq!(analyses.len(), 4);

    let water: u64 = analyses.iter().map(|a| a.counts.get("water")).sum();
    let land: u64 = analyses.iter().map(|a| a.counts.get("land")).sum();

    let palette = classifier.palette();
    let whole = aggregate(classify(&image, 16, &palette), &palette);
    assert_eq!(water, whole.get("water"));
    assert_eq!(land, whole.get("land"));
}

#[test]
fn classify_and_report_without_pipeline() {
    // The classify/aggregate/report stages are usable directly on any
    // classified raster, independent of the compositor.
    let palette = ClassPalette::from_parts(
        &["water".to_string(), "land".to_string()],
        &[[0, 0, 255], [0, 255, 0]],
    );
    let raster = RgbImage::from_pixel(48, 48, Rgb([10, 10, 240]));

    let counts = aggregate(classify(&raster, 16, &palette), &palette);
    assert_eq!(counts.get("water"), 9);

    let coordinate = GeoCoordinate::new(12.9716, 77.5946).unwrap();
    let report = GeoReport::new(coordinate, "raster.png", counts, palette);
    let kml = report.to_kml();
    assert!(kml.contains("water: 9 grids"));
    assert!(kml.contains("<coordinates>77.5946,12.9716,0</coordinates>"));
}
