//! Sequential search strategy: one page request at a time.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::listing::ListingClient;
use crate::vacancy::VacancySummary;

use super::types::{SearchError, SearchQuery, Searcher};

/// Walks result pages one by one, blocking on each page until the service
/// signals there are no more pages or the query limits are reached.
pub struct SequentialSearcher {
    client: Arc<dyn ListingClient>,
    page_delay: Duration,
}

impl SequentialSearcher {
    pub fn new(client: Arc<dyn ListingClient>) -> Self {
        Self {
            client,
            page_delay: Duration::ZERO,
        }
    }

    /// Pause between page requests, to stay friendly with service rate limits.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }
}

#[async_trait]
impl Searcher for SequentialSearcher {
    fn name(&self) -> &str {
        "sequential"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<VacancySummary>, SearchError> {
        if query.text.trim().is_empty() {
            return Err(SearchError::MalformedQuery(
                "query text must not be empty".to_string(),
            ));
        }

        let mut all: Vec<VacancySummary> = Vec::new();
        let mut page = 0u32;

        loop {
            let result = self.client.list_page(&query.page_request(page)).await?;
            let total_pages = result.pages;
            all.extend(result.summaries);

            debug!(
                query = %query.text,
                page = page,
                collected = all.len(),
                "Search page collected"
            );

            if let Some(limit) = query.max_results {
                if all.len() >= limit {
                    all.truncate(limit);
                    break;
                }
            }

            page += 1;
            if page >= total_pages || page >= query.max_pages {
                break;
            }

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockListingClient};

    #[tokio::test]
    async fn test_walks_all_pages_in_order() {
        let client = MockListingClient::new();
        client
            .set_pages(vec![
                fixtures::page(0, 3, &["1", "2"]),
                fixtures::page(1, 3, &["3", "4"]),
                fixtures::page(2, 3, &["5"]),
            ])
            .await;

        let searcher = SequentialSearcher::new(Arc::new(client));
        let results = searcher.search(&SearchQuery::new("rust")).await.unwrap();

        let ids: Vec<&str> = results.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn test_respects_max_pages() {
        let client = MockListingClient::new();
        client
            .set_pages(vec![
                fixtures::page(0, 3, &["1"]),
                fixtures::page(1, 3, &["2"]),
                fixtures::page(2, 3, &["3"]),
            ])
            .await;

        let mut query = SearchQuery::new("rust");
        query.max_pages = 2;

        let searcher = SequentialSearcher::new(Arc::new(client));
        let results = searcher.search(&query).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_truncates_to_max_results() {
        let client = MockListingClient::new();
        client
            .set_pages(vec![
                fixtures::page(0, 2, &["1", "2", "3"]),
                fixtures::page(1, 2, &["4", "5"]),
            ])
            .await;

        let mut query = SearchQuery::new("rust");
        query.max_results = Some(2);

        let searcher = SequentialSearcher::new(Arc::new(client));
        let results = searcher.search(&query).await.unwrap();
        assert_eq!(results.len(), 2);
        // No second page request once the cap is reached.
        // (page 0 satisfied the cap already)
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let searcher = SequentialSearcher::new(Arc::new(MockListingClient::new()));
        let result = searcher.search(&SearchQuery::new("   ")).await;
        assert!(matches!(result, Err(SearchError::MalformedQuery(_))));
    }

    #[tokio::test]
    async fn test_empty_result_is_valid() {
        let client = MockListingClient::new();
        client.set_pages(vec![fixtures::page(0, 1, &[])]).await;

        let searcher = SequentialSearcher::new(Arc::new(client));
        let results = searcher.search(&SearchQuery::new("nothing")).await.unwrap();
        assert!(results.is_empty());
    }
}
