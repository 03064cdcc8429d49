//! Types for the listing-service client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vacancy::VacancySummary;

/// Parameters for one page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Free-text search query.
    pub text: String,
    /// Region code understood by the listing service.
    pub area: u32,
    /// Results per page.
    pub per_page: u32,
    /// Zero-based page index.
    pub page: u32,
}

/// One page of search results, already adapted to the domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyPage {
    pub summaries: Vec<VacancySummary>,
    /// Zero-based index of this page.
    pub page: u32,
    /// Total pages the service reports for the query.
    pub pages: u32,
    /// Total matching vacancies the service reports.
    pub found: u64,
}

impl VacancyPage {
    /// Whether the service has pages beyond this one.
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.pages
    }
}

/// Raw detail payload for a single vacancy. Fields the pipeline interprets
/// are typed; everything else lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailPayload {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_skills: Vec<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Salary block as the listing service reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Reference object of the form `{"name": "..."}` used all over the listing
/// service payloads (employer, schedule, area, skills).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// Errors from the listing-service client.
#[derive(Debug, Clone, Error)]
pub enum ListingError {
    #[error("listing service connection failed: {0}")]
    ConnectionFailed(String),

    #[error("listing service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("vacancy not found: {0}")]
    NotFound(String),

    #[error("failed to decode listing response: {0}")]
    Decode(String),

    #[error("request timeout")]
    Timeout,
}

impl ListingError {
    /// Whether retrying the same request can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout => true,
            Self::Http { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::NotFound(_) | Self::Decode(_) => false,
        }
    }
}

/// Client for the external vacancy listing service.
#[async_trait]
pub trait ListingClient: Send + Sync {
    /// Fetch one page of search results.
    async fn list_page(&self, request: &PageRequest) -> Result<VacancyPage, ListingError>;

    /// Fetch the full detail payload for a vacancy id.
    async fn get_details(&self, id: &str) -> Result<DetailPayload, ListingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_next() {
        let page = VacancyPage {
            summaries: vec![],
            page: 0,
            pages: 3,
            found: 250,
        };
        assert!(page.has_next());

        let last = VacancyPage {
            summaries: vec![],
            page: 2,
            pages: 3,
            found: 250,
        };
        assert!(!last.has_next());
    }

    #[test]
    fn test_detail_payload_keeps_unknown_fields() {
        let json = r#"{
            "id": "42",
            "name": "Backend engineer",
            "salary": {"from": 90000, "currency": "RUR"},
            "employer": {"name": "Acme"},
            "premium": true,
            "address": {"city": "Moscow"}
        }"#;
        let payload: DetailPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.id, "42");
        assert_eq!(payload.salary.as_ref().unwrap().from, Some(90_000.0));
        assert_eq!(payload.employer.as_ref().unwrap().name, "Acme");
        assert!(payload.extra.contains_key("premium"));
        assert!(payload.extra.contains_key("address"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ListingError::Timeout.is_retryable());
        assert!(ListingError::ConnectionFailed("refused".into()).is_retryable());
        assert!(ListingError::Http {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(ListingError::Http {
            status: 429,
            body: String::new()
        }
        .is_retryable());
        assert!(!ListingError::Http {
            status: 400,
            body: String::new()
        }
        .is_retryable());
        assert!(!ListingError::NotFound("42".into()).is_retryable());
        assert!(!ListingError::Decode("bad json".into()).is_retryable());
    }
}
