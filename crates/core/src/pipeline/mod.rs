//! Pipeline orchestrator for vacancy aggregation runs.
//!
//! A run moves through the stages
//! `Searching → Fetching → Persisting → Analyzing → Visualizing → Done`,
//! with `Failed` reachable from any non-terminal stage. Failure handling is
//! deliberately asymmetric:
//! - search failures abort the run (nothing was collected yet);
//! - per-item fetch failures are recorded and skipped, fatal only when the
//!   whole batch failed;
//! - persistence failures abort before analysis (silent data loss otherwise);
//! - visualization failures downgrade the run to done-with-warning, since
//!   the user's data is already saved.

mod config;
mod runner;
mod types;

pub use config::PipelineConfig;
pub use runner::{PipelineParts, VacancyPipeline};
pub use types::{CancelHandle, PipelineError, RunReport, RunStage};
