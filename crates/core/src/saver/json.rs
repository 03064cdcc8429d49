//! JSON persistence backend.

use async_trait::async_trait;
use std::path::Path;
use tracing::info;

use crate::vacancy::VacancyRecord;

use super::types::{SaveError, SaveSummary, Saver};
use super::write_atomic;

/// Saves records as a pretty-printed JSON array.
pub struct JsonSaver;

#[async_trait]
impl Saver for JsonSaver {
    fn format(&self) -> &str {
        "json"
    }

    async fn save(
        &self,
        records: &[VacancyRecord],
        destination: &Path,
    ) -> Result<SaveSummary, SaveError> {
        let bytes =
            serde_json::to_vec_pretty(records).map_err(|e| SaveError::Encode(e.to_string()))?;
        let written = write_atomic(destination, &bytes).await?;

        info!(
            path = %destination.display(),
            records = records.len(),
            bytes = written,
            "Records saved as JSON"
        );

        Ok(SaveSummary {
            path: destination.to_path_buf(),
            records: records.len(),
            bytes: written,
        })
    }
}
