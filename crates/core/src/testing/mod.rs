//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the pipeline's capability
//! traits, allowing lifecycle tests without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use vacanza_core::testing::{fixtures, MockFetcher, MockSearcher};
//!
//! let searcher = MockSearcher::new();
//! searcher.set_results(vec![fixtures::summary("1")]).await;
//!
//! let fetcher = MockFetcher::new();
//! fetcher.fail_id("1").await;
//! ```

mod mock_fetcher;
mod mock_listing_client;
mod mock_saver;
mod mock_searcher;
mod mock_visualizer;

pub use mock_fetcher::MockFetcher;
pub use mock_listing_client::MockListingClient;
pub use mock_saver::{MockSaver, RecordedSave};
pub use mock_searcher::MockSearcher;
pub use mock_visualizer::MockVisualizer;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::listing::{DetailPayload, NamedRef, SalaryPayload, VacancyPage};
    use crate::vacancy::{SalaryRange, VacancyRecord, VacancySummary};

    /// Create a test summary with derived title and URL.
    pub fn summary(id: &str) -> VacancySummary {
        VacancySummary::new(
            id,
            format!("Vacancy {id}"),
            format!("https://example.com/vacancies/{id}"),
        )
    }

    /// Create a search result page holding the given vacancy ids.
    pub fn page(page: u32, pages: u32, ids: &[&str]) -> VacancyPage {
        VacancyPage {
            summaries: ids.iter().map(|id| summary(id)).collect(),
            page,
            pages,
            found: ids.len() as u64,
        }
    }

    /// Create a test record with reasonable defaults.
    pub fn record(id: &str, title: &str, company: &str, salary_from: Option<f64>) -> VacancyRecord {
        VacancyRecord {
            summary: VacancySummary::new(
                id,
                title,
                format!("https://example.com/vacancies/{id}"),
            ),
            description: format!("Description for {title}"),
            salary: salary_from.map(|from| SalaryRange {
                from: Some(from),
                to: Some(from * 1.4),
                currency: Some("RUR".to_string()),
            }),
            company: company.to_string(),
            schedule: None,
            experience: None,
            area: None,
            key_skills: vec![],
            posted_at: None,
            raw: serde_json::Map::new(),
        }
    }

    /// Create the record a fetch of this summary would produce.
    pub fn record_for(summary: &VacancySummary) -> VacancyRecord {
        VacancyRecord {
            summary: summary.clone(),
            description: format!("Description for {}", summary.title),
            salary: None,
            company: "Mock Co".to_string(),
            schedule: None,
            experience: None,
            area: None,
            key_skills: vec![],
            posted_at: None,
            raw: serde_json::Map::new(),
        }
    }

    /// Create a detail payload matching what the listing service returns.
    pub fn detail_payload(id: &str, salary_from: Option<f64>) -> DetailPayload {
        DetailPayload {
            id: id.to_string(),
            name: format!("Vacancy {id}"),
            alternate_url: Some(format!("https://example.com/vacancies/{id}")),
            description: Some("<p>Things to do</p>".to_string()),
            salary: salary_from.map(|from| SalaryPayload {
                from: Some(from),
                to: None,
                currency: Some("RUR".to_string()),
            }),
            employer: Some(NamedRef {
                name: "Mock Co".to_string(),
            }),
            schedule: None,
            experience: None,
            area: None,
            key_skills: vec![],
            published_at: None,
            extra: serde_json::Map::new(),
        }
    }
}
