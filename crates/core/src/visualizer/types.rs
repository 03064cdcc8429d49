//! Types for the visualization stage.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analyzer::AnalysisResult;

/// Errors that can occur while rendering chart artifacts.
#[derive(Debug, Error)]
pub enum VisualizationError {
    #[error("failed to write chart {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// Trait for chart rendering backends.
///
/// A failed render never invalidates the run's persisted data; the pipeline
/// reports it as a warning instead.
pub trait Visualizer: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Render charts for an analysis snapshot into the output directory.
    /// Returns the paths of the artifacts actually written.
    fn render(
        &self,
        analysis: &AnalysisResult,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, VisualizationError>;
}
