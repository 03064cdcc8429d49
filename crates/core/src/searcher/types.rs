//! Types for the vacancy search stage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::{ListingError, PageRequest};
use crate::vacancy::VacancySummary;

/// Query parameters for a vacancy search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query, e.g. a job title.
    pub text: String,
    /// Region code understood by the listing service.
    #[serde(default = "default_area")]
    pub area: u32,
    /// Results per page requested from the service.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Upper bound on pages walked.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Optional cap on collected summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
}

fn default_area() -> u32 {
    1
}

fn default_per_page() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    20
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            area: default_area(),
            per_page: default_per_page(),
            max_pages: default_max_pages(),
            max_results: None,
        }
    }

    /// Request for a single page of this query.
    pub fn page_request(&self, page: u32) -> PageRequest {
        PageRequest {
            text: self.text.clone(),
            area: self.area,
            per_page: self.per_page,
            page,
        }
    }
}

/// Errors that can occur during the search stage.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    #[error("listing service error: {0}")]
    Service(#[from] ListingError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Trait for vacancy search strategies.
///
/// Implementations must return summaries in the order the listing service
/// ranks them; callers holding only this trait observe identical output from
/// every variant, modulo latency.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Strategy name for logging.
    fn name(&self) -> &str;

    /// Collect summaries for a query across result pages.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<VacancySummary>, SearchError>;
}
