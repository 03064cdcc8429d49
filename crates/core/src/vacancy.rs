//! Core vacancy data model shared by all pipeline stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal identity of a vacancy as returned by the search stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancySummary {
    /// Listing-service identifier, unique per service.
    pub id: String,
    /// Vacancy title.
    pub title: String,
    /// Human-facing URL on the listing service.
    pub url: String,
}

impl VacancySummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Advertised salary range. Either bound may be open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl SalaryRange {
    /// Representative value used for aggregate statistics: the lower bound,
    /// falling back to the upper one.
    pub fn representative(&self) -> Option<f64> {
        self.from.or(self.to)
    }

    /// A range with neither bound carries no information.
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Fully enriched vacancy, produced once by the details fetcher and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub summary: VacancySummary,
    /// Description with HTML markup already stripped.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryRange>,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    /// Source-specific payload fields the data model does not interpret.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub raw: serde_json::Map<String, serde_json::Value>,
}
