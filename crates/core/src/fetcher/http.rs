//! Details fetcher backed by the listing-service client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::listing::{DetailPayload, ListingClient, ListingError};
use crate::text;
use crate::vacancy::{SalaryRange, VacancyRecord, VacancySummary};

use super::types::{DetailsFetcher, FetchError};

/// Fetches detail payloads through a `ListingClient` and adapts them into
/// immutable vacancy records.
pub struct HttpDetailsFetcher {
    client: Arc<dyn ListingClient>,
}

impl HttpDetailsFetcher {
    pub fn new(client: Arc<dyn ListingClient>) -> Self {
        Self { client }
    }
}

/// Build a record from a raw detail payload.
///
/// The summary keeps its search identity; title and URL prefer the payload
/// values when present since detail data is fresher than search data.
pub(crate) fn record_from_payload(summary: &VacancySummary, payload: DetailPayload) -> VacancyRecord {
    let title = if payload.name.is_empty() {
        summary.title.clone()
    } else {
        payload.name
    };
    let url = payload
        .alternate_url
        .unwrap_or_else(|| summary.url.clone());

    let salary = payload.salary.and_then(|s| {
        let range = SalaryRange {
            from: s.from,
            to: s.to,
            currency: s.currency,
        };
        if range.is_open() {
            None
        } else {
            Some(range)
        }
    });

    let posted_at = payload
        .published_at
        .as_deref()
        .and_then(parse_timestamp);

    VacancyRecord {
        summary: VacancySummary {
            id: summary.id.clone(),
            title,
            url,
        },
        description: text::strip_html(payload.description.as_deref().unwrap_or("")),
        salary,
        company: payload.employer.map(|e| e.name).unwrap_or_default(),
        schedule: payload.schedule.map(|s| s.name),
        experience: payload.experience.map(|e| e.name),
        area: payload.area.map(|a| a.name),
        key_skills: payload.key_skills.into_iter().map(|s| s.name).collect(),
        posted_at,
        raw: payload.extra,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl DetailsFetcher for HttpDetailsFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, summary: &VacancySummary) -> Result<VacancyRecord, FetchError> {
        debug!(id = %summary.id, "Fetching vacancy details");
        let payload = match self.client.get_details(&summary.id).await {
            Ok(payload) => payload,
            Err(ListingError::NotFound(id)) => return Err(FetchError::NotFound(id)),
            Err(e) => return Err(FetchError::Service(e)),
        };

        Ok(record_from_payload(summary, payload))
    }
}
