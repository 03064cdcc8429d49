//! Mock details fetcher for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::fetcher::{DetailsFetcher, FetchError};
use crate::vacancy::{VacancyRecord, VacancySummary};

use super::fixtures;

/// Mock implementation of the `DetailsFetcher` trait.
///
/// Expands summaries into fixture records, with configurable per-id
/// failures, per-id delays and call tracking. The started/completed counters
/// make in-flight behaviour observable for cancellation tests.
pub struct MockFetcher {
    records: Arc<RwLock<HashMap<String, VacancyRecord>>>,
    fail_ids: Arc<RwLock<HashSet<String>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    default_delay: Arc<RwLock<Duration>>,
    calls: Arc<RwLock<Vec<String>>>,
    started: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_ids: Arc::new(RwLock::new(HashSet::new())),
            delays: Arc::new(RwLock::new(HashMap::new())),
            default_delay: Arc::new(RwLock::new(Duration::ZERO)),
            calls: Arc::new(RwLock::new(Vec::new())),
            started: Arc::new(AtomicUsize::new(0)),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Override the record returned for one id.
    pub async fn set_record(&self, record: VacancyRecord) {
        self.records
            .write()
            .await
            .insert(record.summary.id.clone(), record);
    }

    /// Make fetches for the given id fail as not-found.
    pub async fn fail_id(&self, id: &str) {
        self.fail_ids.write().await.insert(id.to_string());
    }

    /// Delay applied to fetches for one id.
    pub async fn set_delay(&self, id: &str, delay: Duration) {
        self.delays.write().await.insert(id.to_string(), delay);
    }

    /// Delay applied to every fetch without a per-id delay.
    pub async fn set_default_delay(&self, delay: Duration) {
        *self.default_delay.write().await = delay;
    }

    /// Ids fetched, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Fetches that have started executing.
    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Fetches that ran to completion, successful or not.
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailsFetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, summary: &VacancySummary) -> Result<VacancyRecord, FetchError> {
        self.calls.write().await.push(summary.id.clone());
        self.started.fetch_add(1, Ordering::SeqCst);

        let delay = {
            let delays = self.delays.read().await;
            delays
                .get(&summary.id)
                .copied()
                .unwrap_or(*self.default_delay.read().await)
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.fail_ids.read().await.contains(&summary.id) {
            return Err(FetchError::NotFound(summary.id.clone()));
        }

        let configured = self.records.read().await.get(&summary.id).cloned();
        Ok(configured.unwrap_or_else(|| fixtures::record_for(summary)))
    }
}
