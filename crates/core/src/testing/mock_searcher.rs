//! Mock searcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::searcher::{SearchError, SearchQuery, Searcher};
use crate::vacancy::VacancySummary;

/// Mock implementation of the `Searcher` trait.
///
/// Returns configured summaries, records queries for assertions and can fail
/// the next search with a configured error.
pub struct MockSearcher {
    results: Arc<RwLock<Vec<VacancySummary>>>,
    searches: Arc<RwLock<Vec<SearchQuery>>>,
    next_error: Arc<RwLock<Option<SearchError>>>,
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearcher {
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the summaries returned by subsequent searches.
    pub async fn set_results(&self, results: Vec<VacancySummary>) {
        *self.results.write().await = results;
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Recorded search queries.
    pub async fn recorded_searches(&self) -> Vec<SearchQuery> {
        self.searches.read().await.clone()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<VacancySummary>, SearchError> {
        self.searches.write().await.push(query.clone());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(self.results.read().await.clone())
    }
}
