//! landgrid - Satellite imagery compositing and land-cover aggregation
//!
//! This library turns a geographic coordinate into a stitched satellite
//! viewport image, reduces an externally classified raster into per-class
//! grid-cell counts, and exports the results as a KML report.
//!
//! # Pipeline
//!
//! ```ignore
//! use landgrid::compositor::{TileCompositor, Viewport};
//! use landgrid::coord::GeoCoordinate;
//! use landgrid::provider::{EsriWorldImagery, ReqwestClient};
//! use landgrid::pipeline;
//!
//! let center = GeoCoordinate::new(37.7749, -122.4194)?;
//! let viewport = Viewport::new(center, 15, 1024, 768);
//! let compositor = TileCompositor::new(EsriWorldImagery::new(ReqwestClient::new()?));
//!
//! // `classifier` implements pipeline::ImageClassifier
//! let handle = pipeline::spawn(compositor, classifier, viewport);
//! let output = handle.join()?;
//! output.to_report(None).write_kml("classification.kml".as_ref())?;
//! ```

pub mod classify;
pub mod compositor;
pub mod config;
pub mod coord;
pub mod logging;
pub mod pipeline;
pub mod provider;
pub mod report;

/// Version of the landgrid library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
