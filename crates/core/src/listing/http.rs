//! HTTP implementation of the listing-service client.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ListingConfig;
use crate::vacancy::VacancySummary;

use super::retry::RetryPolicy;
use super::types::{DetailPayload, ListingClient, ListingError, PageRequest, VacancyPage};

/// Client for an HH-style vacancy listing REST API.
///
/// Endpoints: `GET {base}/vacancies` for paged search and
/// `GET {base}/vacancies/{id}` for details.
pub struct HttpListingClient {
    client: Client,
    config: ListingConfig,
    retry: RetryPolicy,
}

/// Search response as the service returns it.
#[derive(Debug, Deserialize)]
struct SearchPagePayload {
    #[serde(default)]
    items: Vec<SearchItemPayload>,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    pages: u32,
    #[serde(default)]
    found: u64,
}

#[derive(Debug, Deserialize)]
struct SearchItemPayload {
    id: String,
    name: String,
    #[serde(default)]
    alternate_url: Option<String>,
}

impl HttpListingClient {
    pub fn new(config: ListingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        let retry = RetryPolicy::new(&config.retry);

        Self {
            client,
            config,
            retry,
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// GET a JSON document, retrying transient failures per the policy.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ListingError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.request_once(url, query).await {
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts() => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        url = url,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Listing request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    async fn request_once<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ListingError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ListingError::Timeout
                } else {
                    ListingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ListingError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ListingError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ListingClient for HttpListingClient {
    async fn list_page(&self, request: &PageRequest) -> Result<VacancyPage, ListingError> {
        let url = format!("{}/vacancies", self.base_url());
        let query = [
            ("text", request.text.clone()),
            ("area", request.area.to_string()),
            ("page", request.page.to_string()),
            ("per_page", request.per_page.to_string()),
        ];

        debug!(text = %request.text, page = request.page, "Listing page request");
        let payload: SearchPagePayload = self.get_json(&url, &query).await?;

        let summaries = payload
            .items
            .into_iter()
            .map(|item| VacancySummary {
                id: item.id,
                title: item.name,
                url: item.alternate_url.unwrap_or_default(),
            })
            .collect();

        Ok(VacancyPage {
            summaries,
            page: payload.page,
            pages: payload.pages,
            found: payload.found,
        })
    }

    async fn get_details(&self, id: &str) -> Result<DetailPayload, ListingError> {
        let url = format!("{}/vacancies/{}", self.base_url(), id);

        debug!(id = id, "Listing detail request");
        match self.get_json::<DetailPayload>(&url, &[]).await {
            Err(ListingError::Http { status: 404, .. }) => {
                Err(ListingError::NotFound(id.to_string()))
            }
            other => other,
        }
    }
}
