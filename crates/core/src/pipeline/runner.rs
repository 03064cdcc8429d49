//! Pipeline orchestrator implementation.
//!
//! Drives a single run through its stages:
//! Searching → Fetching → Persisting → Analyzing → Visualizing → Done.
//! Stages never overlap; detail fetches run concurrently inside the Fetching
//! stage under a bounded worker pool and settle before Persisting starts.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{RwLock, Semaphore};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analyzer::Analyzer;
use crate::fetcher::{DetailsFetcher, FetchFailure};
use crate::metrics;
use crate::saver::Saver;
use crate::searcher::{dedup_by_id, SearchQuery, Searcher};
use crate::vacancy::{VacancyRecord, VacancySummary};
use crate::visualizer::Visualizer;

use super::config::PipelineConfig;
use super::types::{CancelHandle, PipelineError, RunReport, RunStage};

/// The capabilities a pipeline is assembled from, one per stage.
pub struct PipelineParts {
    pub searcher: Arc<dyn Searcher>,
    pub fetcher: Arc<dyn DetailsFetcher>,
    pub saver: Arc<dyn Saver>,
    pub analyzer: Arc<dyn Analyzer>,
    pub visualizer: Arc<dyn Visualizer>,
}

/// Outcome of one detail fetch slot.
enum FetchOutcome {
    Fetched(Box<VacancyRecord>),
    Failed(FetchFailure),
    /// Cancellation arrived before this fetch was issued.
    Skipped,
}

/// The vacancy pipeline - sequences search, enrichment, persistence,
/// analysis and visualization behind injected capability interfaces.
pub struct VacancyPipeline {
    config: PipelineConfig,
    searcher: Arc<dyn Searcher>,
    fetcher: Arc<dyn DetailsFetcher>,
    saver: Arc<dyn Saver>,
    analyzer: Arc<dyn Analyzer>,
    visualizer: Arc<dyn Visualizer>,
    cancel: CancelHandle,
    stage: Arc<RwLock<RunStage>>,
}

impl VacancyPipeline {
    /// Create a pipeline from its configuration and injected parts.
    pub fn new(config: PipelineConfig, parts: PipelineParts) -> Self {
        Self {
            config,
            searcher: parts.searcher,
            fetcher: parts.fetcher,
            saver: parts.saver,
            analyzer: parts.analyzer,
            visualizer: parts.visualizer,
            cancel: CancelHandle::new(),
            stage: Arc::new(RwLock::new(RunStage::Idle)),
        }
    }

    /// Handle for cancelling the run from another task.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stage the pipeline is currently in.
    pub async fn stage(&self) -> RunStage {
        *self.stage.read().await
    }

    async fn enter_stage(&self, stage: RunStage) {
        *self.stage.write().await = stage;
        info!(stage = %stage, "Pipeline stage");
    }

    /// Cooperative cancellation checkpoint between stages.
    fn checkpoint(&self, stage: RunStage) -> Result<(), PipelineError> {
        if self.cancel.is_cancelled() {
            Err(PipelineError::Cancelled {
                stage,
                reason: "cancellation requested".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Execute a full run for a query, persisting records at `destination`.
    pub async fn run(
        &self,
        query: &SearchQuery,
        destination: &Path,
    ) -> Result<RunReport, PipelineError> {
        let run_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        info!(
            run_id = %run_id,
            query = %query.text,
            destination = %destination.display(),
            searcher = self.searcher.name(),
            "Pipeline run started"
        );

        let result = self.run_inner(&run_id, query, destination, started).await;

        metrics::RUN_DURATION.observe(started.elapsed().as_secs_f64());
        match &result {
            Ok(report) => {
                self.enter_stage(RunStage::Done).await;
                let label = if report.visualization_warning.is_some() {
                    "done_with_warning"
                } else {
                    "done"
                };
                metrics::RUNS_TOTAL.with_label_values(&[label]).inc();
                info!(
                    run_id = %run_id,
                    records = report.records_processed,
                    failures = report.fetch_failures.len(),
                    duration_ms = report.duration_ms,
                    "Pipeline run complete"
                );
            }
            Err(e) => {
                self.enter_stage(RunStage::Failed).await;
                metrics::RUNS_TOTAL.with_label_values(&["failed"]).inc();
                warn!(
                    run_id = %run_id,
                    stage = %e.stage(),
                    error = %e,
                    "Pipeline run failed"
                );
            }
        }

        result
    }

    async fn run_inner(
        &self,
        run_id: &str,
        query: &SearchQuery,
        destination: &Path,
        started: Instant,
    ) -> Result<RunReport, PipelineError> {
        // Searching: an empty result set is valid and proceeds.
        self.enter_stage(RunStage::Searching).await;
        let summaries = self.searcher.search(query).await?;
        let summaries_found = summaries.len();

        let (summaries, duplicates_removed) = dedup_by_id(summaries);
        if duplicates_removed > 0 {
            metrics::DUPLICATES_DROPPED.inc_by(duplicates_removed as u64);
            debug!(
                run_id = run_id,
                dropped = duplicates_removed,
                "Dropped duplicate summaries"
            );
        }
        self.checkpoint(RunStage::Searching)?;

        // Fetching: per-item failures are recorded, not fatal, unless every
        // item failed.
        self.enter_stage(RunStage::Fetching).await;
        let outcomes = self.fetch_all(&summaries).await;

        let mut records: Vec<VacancyRecord> = Vec::with_capacity(outcomes.len());
        let mut failures: Vec<FetchFailure> = Vec::new();
        for outcome in outcomes {
            match outcome {
                FetchOutcome::Fetched(record) => records.push(*record),
                FetchOutcome::Failed(failure) => failures.push(failure),
                FetchOutcome::Skipped => {}
            }
        }
        metrics::FETCH_FAILURES.inc_by(failures.len() as u64);

        if self.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled {
                stage: RunStage::Fetching,
                reason: "cancellation requested".to_string(),
            });
        }
        if !summaries.is_empty() && records.is_empty() {
            return Err(PipelineError::AllFetchesFailed {
                attempted: summaries.len(),
                failures,
            });
        }

        // Persisting: failure here is terminal, downstream analysis must not
        // run on data the user cannot retrieve later.
        self.enter_stage(RunStage::Persisting).await;
        let saved = self.saver.save(&records, destination).await?;
        metrics::RECORDS_PERSISTED
            .with_label_values(&[self.saver.format()])
            .observe(records.len() as f64);
        self.checkpoint(RunStage::Persisting)?;

        // Analyzing never fails; an empty batch yields an empty snapshot.
        self.enter_stage(RunStage::Analyzing).await;
        let analysis = self.analyzer.analyze(&records);
        self.checkpoint(RunStage::Analyzing)?;

        // Visualizing: data is already durable, a failure only downgrades
        // the run to done-with-warning.
        self.enter_stage(RunStage::Visualizing).await;
        let charts_dir = self.charts_dir(destination);
        let (charts, visualization_warning) =
            match self.visualizer.render(&analysis, &charts_dir) {
                Ok(paths) => (paths, None),
                Err(e) => {
                    warn!(
                        run_id = run_id,
                        error = %e,
                        "Visualization failed, persisted data is unaffected"
                    );
                    (Vec::new(), Some(e.to_string()))
                }
            };

        Ok(RunReport {
            run_id: run_id.to_string(),
            query: query.text.clone(),
            stage_reached: RunStage::Done,
            summaries_found,
            duplicates_removed,
            records_processed: records.len(),
            fetch_failures: failures,
            saved,
            analysis,
            charts,
            visualization_warning,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Fetch details for every summary under the bounded worker pool.
    ///
    /// Outcomes come back in summary order regardless of completion order,
    /// so the saver sees records exactly as the searcher ranked them.
    async fn fetch_all(&self, summaries: &[VacancySummary]) -> Vec<FetchOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_fetches.max(1)));

        let fetch_futures: Vec<_> = summaries
            .iter()
            .map(|summary| {
                let fetcher = Arc::clone(&self.fetcher);
                let semaphore = Arc::clone(&semaphore);
                let cancel = self.cancel.clone();
                let summary = summary.clone();
                async move {
                    let Ok(_permit) = semaphore.acquire().await else {
                        return FetchOutcome::Skipped;
                    };
                    // Cancellation stops new fetches from being issued;
                    // fetches past this point run to completion.
                    if cancel.is_cancelled() {
                        return FetchOutcome::Skipped;
                    }

                    match fetcher.fetch(&summary).await {
                        Ok(record) => FetchOutcome::Fetched(Box::new(record)),
                        Err(e) => {
                            warn!(id = %summary.id, error = %e, "Detail fetch failed");
                            FetchOutcome::Failed(FetchFailure {
                                id: summary.id,
                                title: summary.title,
                                reason: e.to_string(),
                            })
                        }
                    }
                }
            })
            .collect();

        futures::future::join_all(fetch_futures).await
    }

    fn charts_dir(&self, destination: &Path) -> PathBuf {
        match &self.config.charts_dir {
            Some(dir) => dir.clone(),
            None => destination
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("charts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::VacancyAnalyzer;
    use crate::testing::{MockFetcher, MockSaver, MockSearcher, MockVisualizer};

    fn pipeline() -> VacancyPipeline {
        VacancyPipeline::new(
            PipelineConfig::default(),
            PipelineParts {
                searcher: Arc::new(MockSearcher::new()),
                fetcher: Arc::new(MockFetcher::new()),
                saver: Arc::new(MockSaver::new()),
                analyzer: Arc::new(VacancyAnalyzer::default()),
                visualizer: Arc::new(MockVisualizer::new()),
            },
        )
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let pipeline = pipeline();
        assert_eq!(pipeline.stage().await, RunStage::Idle);
    }

    #[tokio::test]
    async fn test_charts_dir_default_is_sibling() {
        let pipeline = pipeline();
        let dir = pipeline.charts_dir(Path::new("/data/out/records.json"));
        assert_eq!(dir, PathBuf::from("/data/out/charts"));
    }
}
