//! Error types for the classification pipeline.
//!
//! Per-tile fetch failures and malformed grid cells are recovered locally
//! (blank regions, skipped cells) and never reach this level; these errors
//! represent the failures that are fatal to a whole pipeline invocation.

use thiserror::Error;

/// Error reported by an external image classifier.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ClassifierError(pub String);

/// Errors that abort a pipeline invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Coordinate validation failed before any work started
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] crate::coord::CoordError),

    /// The external classifier failed on the input image
    #[error("classification failed: {0}")]
    Classifier(#[from] ClassifierError),

    /// Image encoding or decoding failed while handing data to the
    /// classifier
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// File I/O failed (e.g. staging the viewport image for the
    /// classifier)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the report failed
    #[error("export failed: {0}")]
    Export(#[from] crate::report::ExportError),

    /// The background worker thread panicked
    #[error("pipeline worker panicked")]
    WorkerPanicked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_error_display() {
        let err = ClassifierError("model not loaded".to_string());
        assert_eq!(err.to_string(), "model not loaded");
    }

    #[test]
    fn test_pipeline_error_wraps_classifier() {
        let err = PipelineError::from(ClassifierError("bad input".to_string()));
        assert_eq!(err.to_string(), "classification failed: bad input");
    }

    #[test]
    fn test_pipeline_error_wraps_coord() {
        let coord_err = crate::coord::GeoCoordinate::new(95.0, 0.0).unwrap_err();
        let err = PipelineError::from(coord_err);
        assert!(err.to_string().contains("invalid coordinate"));
    }
}
