//! The compositor-and-classify pipeline.
//!
//! Ties the stages together: composite a viewport image from map tiles,
//! hand it to the external classifier, grid-classify the returned raster,
//! and aggregate per-class counts.
//!
//! One invocation is a single sequential pass owning all of its
//! intermediate state, designed to run as one atomic background task via
//! [`spawn`] so an interactive caller stays responsive. There is no
//! cancellation mid-fetch; individual tile and grid-cell failures degrade
//! gracefully, and only coordinate validation, classifier failures, and
//! report I/O abort the run. Separate invocations share no mutable state
//! and may run concurrently in separate workers.

mod error;

pub use error::{ClassifierError, PipelineError};

use crate::classify::{aggregate, classify, ClassCounts, ClassPalette};
use crate::compositor::{split_quadrants, CompositeStats, TileCompositor, Viewport};
use crate::provider::TileProvider;
use image::RgbImage;
use std::path::Path;
use std::thread;
use tracing::{error, info};

/// Contract of the external image-classification model.
///
/// The model is a collaborator, not part of this crate: it takes an image
/// file path and returns the original raster alongside a classified raster
/// whose blocks are painted with class colors. The class list, colors, and
/// training grid size are queryable and feed grid classification.
pub trait ImageClassifier: Send + Sync {
    /// Runs the model on the image at `path`, returning
    /// `(original, classified)` rasters.
    fn process_image(&self, path: &Path) -> Result<(RgbImage, RgbImage), ClassifierError>;

    /// Ordered class names.
    fn class_names(&self) -> &[String];

    /// Class colors, index-aligned with [`class_names`](Self::class_names).
    fn class_colors(&self) -> &[[u8; 3]];

    /// Side length in pixels of the model's training grid.
    fn grid_size(&self) -> u32;

    /// Assembles the model's palette from its names and colors.
    fn palette(&self) -> ClassPalette {
        ClassPalette::from_parts(self.class_names(), self.class_colors())
    }
}

/// Result of one full pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The viewport that was rendered
    pub viewport: Viewport,
    /// Name under which the viewport image was staged for the classifier
    pub source_name: String,
    /// Composited satellite image (exactly the viewport dimensions)
    pub viewport_image: RgbImage,
    /// Tile fetch bookkeeping for the composite
    pub stats: CompositeStats,
    /// Original raster as returned by the classifier
    pub original: RgbImage,
    /// Classified raster as returned by the classifier
    pub classified: RgbImage,
    /// Per-class grid cell counts
    pub counts: ClassCounts,
    /// The classifier's palette used for counting
    pub palette: ClassPalette,
}

impl PipelineOutput {
    /// Builds an exportable report from this invocation's results.
    pub fn to_report(&self, attribution: Option<&str>) -> crate::report::GeoReport {
        let report = crate::report::GeoReport::new(
            self.viewport.center,
            self.source_name.clone(),
            self.counts.clone(),
            self.palette.clone(),
        );
        match attribution {
            Some(text) => report.with_attribution(text),
            None => report,
        }
    }
}

/// Analysis of one viewport quadrant.
#[derive(Debug, Clone)]
pub struct QuadrantAnalysis {
    /// Quadrant number, 1 through 4 (top-left, top-right, bottom-left,
    /// bottom-right)
    pub quadrant: usize,
    /// Original quadrant raster from the classifier
    pub original: RgbImage,
    /// Classified quadrant raster from the classifier
    pub classified: RgbImage,
    /// Per-class counts for this quadrant
    pub counts: ClassCounts,
}

/// Runs one full pipeline invocation synchronously.
///
/// Composites the viewport, stages the image to a temporary file for the
/// path-based classifier contract, grid-classifies the returned raster,
/// and aggregates per-class counts.
pub fn run<P, C>(
    compositor: &TileCompositor<P>,
    classifier: &C,
    viewport: &Viewport,
) -> Result<PipelineOutput, PipelineError>
where
    P: TileProvider,
    C: ImageClassifier,
{
    info!(
        center = %viewport.center,
        zoom = viewport.zoom,
        width = viewport.width,
        height = viewport.height,
        "Pipeline started"
    );

    let composite = compositor.produce(viewport);

    let (source_name, original, classified) =
        run_classifier(&composite.image, classifier, "viewport")?;

    let palette = classifier.palette();
    let counts = aggregate(
        classify(&classified, classifier.grid_size(), &palette),
        &palette,
    );

    info!(
        fetched = composite.stats.fetched,
        failed = composite.stats.failed,
        skipped = composite.stats.skipped,
        cells = counts.total(),
        "Pipeline complete"
    );

    Ok(PipelineOutput {
        viewport: *viewport,
        source_name,
        viewport_image: composite.image,
        stats: composite.stats,
        original,
        classified,
        counts,
        palette,
    })
}

/// Splits a viewport image into four quadrants and analyzes each one.
///
/// A quadrant whose classification fails is logged and skipped; the
/// remaining quadrants are still analyzed and returned.
pub fn classify_quadrants<C>(image: &RgbImage, classifier: &C) -> Vec<QuadrantAnalysis>
where
    C: ImageClassifier,
{
    let palette = classifier.palette();
    let mut analyses = Vec::with_capacity(4);

    for (index, quadrant) in split_quadrants(image).into_iter().enumerate() {
        let number = index + 1;
        let stage_name = format!("quadrant_{}", number);

        match run_classifier(&quadrant, classifier, &stage_name) {
            Ok((_, original, classified)) => {
                let counts = aggregate(
                    classify(&classified, classifier.grid_size(), &palette),
                    &palette,
                );
                analyses.push(QuadrantAnalysis {
                    quadrant: number,
                    original,
                    classified,
                    counts,
                });
            }
            Err(e) => {
                error!(quadrant = number, error = %e, "Quadrant analysis failed, skipping");
            }
        }
    }

    analyses
}

/// Stages a raster to a temporary PNG and runs the classifier on it.
///
/// The classifier contract is path-based, so in-memory rasters take a
/// round trip through the filesystem. The temporary file is removed when
/// this function returns.
fn run_classifier<C>(
    raster: &RgbImage,
    classifier: &C,
    stage_name: &str,
) -> Result<(String, RgbImage, RgbImage), PipelineError>
where
    C: ImageClassifier,
{
    let staged = tempfile::Builder::new()
        .prefix(stage_name)
        .suffix(".png")
        .tempfile()?;
    raster.save(staged.path())?;

    let source_name = staged
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{}.png", stage_name));

    let (original, classified) = classifier.process_image(staged.path())?;
    Ok((source_name, original, classified))
}

/// Handle to a pipeline invocation running on a background thread.
pub struct PipelineHandle {
    handle: thread::JoinHandle<Result<PipelineOutput, PipelineError>>,
}

impl PipelineHandle {
    /// True once the background invocation has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the invocation completes and returns its result.
    pub fn join(self) -> Result<PipelineOutput, PipelineError> {
        self.handle
            .join()
            .map_err(|_| PipelineError::WorkerPanicked)?
    }
}

/// Runs one pipeline invocation on a dedicated background thread.
///
/// The whole invocation is one atomic task: once started it runs to
/// completion (degrading gracefully on tile failures) or fails on a fatal
/// error, and the caller's thread stays free in the meantime.
pub fn spawn<P, C>(
    compositor: TileCompositor<P>,
    classifier: C,
    viewport: Viewport,
) -> PipelineHandle
where
    P: TileProvider + 'static,
    C: ImageClassifier + 'static,
{
    let handle = thread::spawn(move || run(&compositor, &classifier, &viewport));
    PipelineHandle { handle }
}
