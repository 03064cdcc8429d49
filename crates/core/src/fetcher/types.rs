//! Types for the detail-enrichment stage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::ListingError;
use crate::vacancy::{VacancyRecord, VacancySummary};

/// Errors that can occur while fetching vacancy details.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The summary went stale: the vacancy no longer exists upstream.
    #[error("vacancy {0} no longer exists")]
    NotFound(String),

    #[error("listing service error: {0}")]
    Service(#[from] ListingError),
}

/// One failed detail fetch, kept on the run report instead of aborting the
/// batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub id: String,
    pub title: String,
    pub reason: String,
}

/// Trait for expanding a summary into a full vacancy record.
///
/// Pure expansion: for the same summary and unchanged upstream data the
/// result is equivalent.
#[async_trait]
pub trait DetailsFetcher: Send + Sync {
    /// Implementation name for logging.
    fn name(&self) -> &str;

    /// Fetch the full record behind a summary.
    async fn fetch(&self, summary: &VacancySummary) -> Result<VacancyRecord, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::NotFound("42".to_string());
        assert_eq!(err.to_string(), "vacancy 42 no longer exists");
    }

    #[test]
    fn test_fetch_failure_serialization() {
        let failure = FetchFailure {
            id: "42".to_string(),
            title: "Rust developer".to_string(),
            reason: "vacancy 42 no longer exists".to_string(),
        };
        let json = serde_json::to_string(&failure).unwrap();
        let parsed: FetchFailure = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, failure);
    }
}
