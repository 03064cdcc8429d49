//! Mock listing client for testing search strategies and fetchers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::listing::{DetailPayload, ListingClient, ListingError, PageRequest, VacancyPage};

/// Mock implementation of the `ListingClient` trait.
///
/// Serves configured pages and detail payloads, records requests and can
/// simulate per-page delays and failures.
pub struct MockListingClient {
    pages: Arc<RwLock<Vec<VacancyPage>>>,
    page_delays_ms: Arc<RwLock<Vec<u64>>>,
    failed_pages: Arc<RwLock<HashMap<u32, ListingError>>>,
    details: Arc<RwLock<HashMap<String, DetailPayload>>>,
    failed_details: Arc<RwLock<HashMap<String, ListingError>>>,
    page_requests: Arc<RwLock<Vec<PageRequest>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl Default for MockListingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockListingClient {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(Vec::new())),
            page_delays_ms: Arc::new(RwLock::new(Vec::new())),
            failed_pages: Arc::new(RwLock::new(HashMap::new())),
            details: Arc::new(RwLock::new(HashMap::new())),
            failed_details: Arc::new(RwLock::new(HashMap::new())),
            page_requests: Arc::new(RwLock::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Configure the pages returned for successive page indices.
    pub async fn set_pages(&self, pages: Vec<VacancyPage>) {
        *self.pages.write().await = pages;
    }

    /// Delay (in milliseconds) applied to each page index.
    pub async fn set_page_delays(&self, delays_ms: Vec<u64>) {
        *self.page_delays_ms.write().await = delays_ms;
    }

    /// Make one page index fail with the given error.
    pub async fn fail_page(&self, page: u32, error: ListingError) {
        self.failed_pages.write().await.insert(page, error);
    }

    /// Configure the payload returned for a vacancy id.
    pub async fn set_details(&self, payload: DetailPayload) {
        self.details.write().await.insert(payload.id.clone(), payload);
    }

    /// Make one vacancy id fail with the given error.
    pub async fn fail_details(&self, id: &str, error: ListingError) {
        self.failed_details.write().await.insert(id.to_string(), error);
    }

    /// How many page requests were made.
    pub async fn page_request_count(&self) -> usize {
        self.page_requests.read().await.len()
    }

    /// Recorded page requests, in arrival order.
    pub async fn page_requests(&self) -> Vec<PageRequest> {
        self.page_requests.read().await.clone()
    }

    /// Highest number of concurrently outstanding page requests observed.
    pub async fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingClient for MockListingClient {
    async fn list_page(&self, request: &PageRequest) -> Result<VacancyPage, ListingError> {
        self.page_requests.write().await.push(request.clone());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay_ms = self
            .page_delays_ms
            .read()
            .await
            .get(request.page as usize)
            .copied()
            .unwrap_or(0);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        let result = if let Some(error) = self.failed_pages.read().await.get(&request.page) {
            Err(error.clone())
        } else {
            let pages = self.pages.read().await;
            match pages.get(request.page as usize) {
                Some(page) => Ok(page.clone()),
                None => Ok(VacancyPage {
                    summaries: vec![],
                    page: request.page,
                    pages: pages.len() as u32,
                    found: 0,
                }),
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn get_details(&self, id: &str) -> Result<DetailPayload, ListingError> {
        if let Some(error) = self.failed_details.read().await.get(id) {
            return Err(error.clone());
        }
        self.details
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ListingError::NotFound(id.to_string()))
    }
}
