//! Types for the pipeline orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::analyzer::AnalysisResult;
use crate::fetcher::FetchFailure;
use crate::saver::{SaveError, SaveSummary};
use crate::searcher::SearchError;

/// Stages of a single pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Idle,
    Searching,
    Fetching,
    Persisting,
    Analyzing,
    Visualizing,
    Done,
    Failed,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Searching => "searching",
            Self::Fetching => "fetching",
            Self::Persisting => "persisting",
            Self::Analyzing => "analyzing",
            Self::Visualizing => "visualizing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The search stage failed; nothing was collected.
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// Every detail fetch in the batch failed.
    #[error("all {attempted} detail fetches failed")]
    AllFetchesFailed {
        attempted: usize,
        failures: Vec<FetchFailure>,
    },

    /// Persistence failed; analysis never ran.
    #[error("persistence failed: {0}")]
    Save(#[from] SaveError),

    /// The run was cancelled at a stage checkpoint.
    #[error("run cancelled during {stage}: {reason}")]
    Cancelled { stage: RunStage, reason: String },
}

impl PipelineError {
    /// The stage the run failed in.
    pub fn stage(&self) -> RunStage {
        match self {
            Self::Search(_) => RunStage::Searching,
            Self::AllFetchesFailed { .. } => RunStage::Fetching,
            Self::Save(_) => RunStage::Persisting,
            Self::Cancelled { stage, .. } => *stage,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Identifier of this run, for log correlation.
    pub run_id: String,
    /// Query text the run was started with.
    pub query: String,
    /// Terminal stage; `Done` for every report.
    pub stage_reached: RunStage,
    /// Summaries the search stage returned, duplicates included.
    pub summaries_found: usize,
    /// Duplicate summaries dropped before fetching.
    pub duplicates_removed: usize,
    /// Records that made it through detail fetching.
    pub records_processed: usize,
    /// Per-item fetch failures, in search order.
    pub fetch_failures: Vec<FetchFailure>,
    /// Where and how much was persisted.
    pub saved: SaveSummary,
    /// Statistics computed over the persisted records.
    pub analysis: AnalysisResult,
    /// Chart artifacts written by the visualizer.
    pub charts: Vec<PathBuf>,
    /// Present when visualization failed after data was persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization_warning: Option<String>,
    pub duration_ms: u64,
}

/// Cooperative cancellation flag shared between a pipeline and its caller.
///
/// Cancellation is observed at stage checkpoints and before new fetch work is
/// issued; fetches already in flight run to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
