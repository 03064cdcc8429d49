//! CSV persistence backend.

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::vacancy::VacancyRecord;

use super::types::{SaveError, SaveSummary, Saver};
use super::write_atomic;

/// Saves records as flat CSV rows.
pub struct CsvSaver;

/// Flattened row shape; nested and list fields are joined into cells.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    title: &'a str,
    url: &'a str,
    company: &'a str,
    salary_from: Option<f64>,
    salary_to: Option<f64>,
    currency: Option<&'a str>,
    schedule: Option<&'a str>,
    experience: Option<&'a str>,
    area: Option<&'a str>,
    key_skills: String,
    posted_at: Option<String>,
    description: &'a str,
}

impl<'a> From<&'a VacancyRecord> for CsvRow<'a> {
    fn from(record: &'a VacancyRecord) -> Self {
        Self {
            id: &record.summary.id,
            title: &record.summary.title,
            url: &record.summary.url,
            company: &record.company,
            salary_from: record.salary.as_ref().and_then(|s| s.from),
            salary_to: record.salary.as_ref().and_then(|s| s.to),
            currency: record.salary.as_ref().and_then(|s| s.currency.as_deref()),
            schedule: record.schedule.as_deref(),
            experience: record.experience.as_deref(),
            area: record.area.as_deref(),
            key_skills: record.key_skills.join("; "),
            posted_at: record.posted_at.map(|t| t.to_rfc3339()),
            description: &record.description,
        }
    }
}

#[async_trait]
impl Saver for CsvSaver {
    fn format(&self) -> &str {
        "csv"
    }

    async fn save(
        &self,
        records: &[VacancyRecord],
        destination: &Path,
    ) -> Result<SaveSummary, SaveError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in records {
            writer
                .serialize(CsvRow::from(record))
                .map_err(|e| SaveError::Encode(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| SaveError::Encode(e.to_string()))?;

        let written = write_atomic(destination, &bytes).await?;

        info!(
            path = %destination.display(),
            records = records.len(),
            bytes = written,
            "Records saved as CSV"
        );

        Ok(SaveSummary {
            path: destination.to_path_buf(),
            records: records.len(),
            bytes: written,
        })
    }
}
