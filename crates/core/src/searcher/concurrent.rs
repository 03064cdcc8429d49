//! Concurrent search strategy: bounded parallel page requests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::listing::ListingClient;
use crate::vacancy::VacancySummary;

use super::types::{SearchError, SearchQuery, Searcher};

/// Fetches the first page to learn the page count, then requests the
/// remaining pages in parallel under a concurrency bound.
///
/// Page order is re-imposed before returning, so callers observe exactly the
/// output of the sequential strategy.
pub struct ConcurrentSearcher {
    client: Arc<dyn ListingClient>,
    max_concurrent: usize,
}

impl ConcurrentSearcher {
    pub fn new(client: Arc<dyn ListingClient>, max_concurrent: usize) -> Self {
        Self {
            client,
            max_concurrent: max_concurrent.max(1),
        }
    }
}

#[async_trait]
impl Searcher for ConcurrentSearcher {
    fn name(&self) -> &str {
        "concurrent"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<VacancySummary>, SearchError> {
        if query.text.trim().is_empty() {
            return Err(SearchError::MalformedQuery(
                "query text must not be empty".to_string(),
            ));
        }

        // The first page is fetched alone: it tells us how many pages exist.
        let first = self.client.list_page(&query.page_request(0)).await?;
        let total_pages = first.pages.min(query.max_pages);
        let mut all = first.summaries;

        debug!(
            query = %query.text,
            pages = total_pages,
            found = first.found,
            "Concurrent search started"
        );

        if total_pages > 1 {
            let semaphore = Arc::new(Semaphore::new(self.max_concurrent));

            let page_futures: Vec<_> = (1..total_pages)
                .map(|page| {
                    let client = Arc::clone(&self.client);
                    let semaphore = Arc::clone(&semaphore);
                    let request = query.page_request(page);
                    async move {
                        let _permit = semaphore
                            .acquire()
                            .await
                            .map_err(|_| SearchError::Internal("worker pool closed".to_string()))?;
                        client
                            .list_page(&request)
                            .await
                            .map_err(SearchError::Service)
                    }
                })
                .collect();

            // join_all preserves input order, which restores page order
            // regardless of completion order.
            let pages = futures::future::join_all(page_futures).await;
            for page in pages {
                all.extend(page?.summaries);
            }
        }

        if let Some(limit) = query.max_results {
            all.truncate(limit);
        }

        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListingError;
    use crate::testing::{fixtures, MockListingClient};
    use std::time::Duration;

    #[tokio::test]
    async fn test_page_order_restored() {
        let client = MockListingClient::new();
        client
            .set_pages(vec![
                fixtures::page(0, 4, &["1", "2"]),
                fixtures::page(1, 4, &["3", "4"]),
                fixtures::page(2, 4, &["5", "6"]),
                fixtures::page(3, 4, &["7"]),
            ])
            .await;
        // Earlier pages respond slower than later ones.
        client.set_page_delays(vec![0, 40, 20, 5]).await;

        let searcher = ConcurrentSearcher::new(Arc::new(client), 3);
        let results = searcher.search(&SearchQuery::new("rust")).await.unwrap();

        let ids: Vec<&str> = results.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[tokio::test]
    async fn test_single_page_short_circuit() {
        let client = MockListingClient::new();
        client.set_pages(vec![fixtures::page(0, 1, &["1", "2"])]).await;
        let client = Arc::new(client);

        let searcher = ConcurrentSearcher::new(Arc::clone(&client) as Arc<dyn ListingClient>, 4);
        let results = searcher.search(&SearchQuery::new("rust")).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(client.page_request_count().await, 1);
    }

    #[tokio::test]
    async fn test_failing_page_fails_search() {
        let client = MockListingClient::new();
        client
            .set_pages(vec![
                fixtures::page(0, 2, &["1"]),
                fixtures::page(1, 2, &["2"]),
            ])
            .await;
        client
            .fail_page(1, ListingError::ConnectionFailed("refused".to_string()))
            .await;

        let searcher = ConcurrentSearcher::new(Arc::new(client), 2);
        let result = searcher.search(&SearchQuery::new("rust")).await;
        assert!(matches!(result, Err(SearchError::Service(_))));
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let client = MockListingClient::new();
        client
            .set_pages(vec![
                fixtures::page(0, 5, &["1"]),
                fixtures::page(1, 5, &["2"]),
                fixtures::page(2, 5, &["3"]),
                fixtures::page(3, 5, &["4"]),
                fixtures::page(4, 5, &["5"]),
            ])
            .await;
        client.set_page_delays(vec![0, 30, 30, 30, 30]).await;
        let client = Arc::new(client);

        let searcher = ConcurrentSearcher::new(Arc::clone(&client) as Arc<dyn ListingClient>, 2);
        let results = tokio::time::timeout(
            Duration::from_secs(5),
            searcher.search(&SearchQuery::new("rust")),
        )
        .await
        .expect("search timed out")
        .unwrap();

        assert_eq!(results.len(), 5);
        assert!(client.max_in_flight().await <= 2);
    }
}
