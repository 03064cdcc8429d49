//! Mock visualizer for testing.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::analyzer::AnalysisResult;
use crate::visualizer::{VisualizationError, Visualizer};

/// Mock implementation of the `Visualizer` trait.
///
/// Records rendered snapshots and can be switched into a failing mode.
#[derive(Default)]
pub struct MockVisualizer {
    rendered: Mutex<Vec<AnalysisResult>>,
    fail: AtomicBool,
}

impl MockVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every render call fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn render_count(&self) -> usize {
        self.rendered.lock().expect("mutex poisoned").len()
    }

    /// Analysis snapshots passed to render, in call order.
    pub fn rendered(&self) -> Vec<AnalysisResult> {
        self.rendered.lock().expect("mutex poisoned").clone()
    }
}

impl Visualizer for MockVisualizer {
    fn name(&self) -> &str {
        "mock"
    }

    fn render(
        &self,
        analysis: &AnalysisResult,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, VisualizationError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(VisualizationError::Render(
                "mock visualizer failure".to_string(),
            ));
        }

        self.rendered
            .lock()
            .expect("mutex poisoned")
            .push(analysis.clone());
        Ok(vec![output_dir.join("mock.svg")])
    }
}
