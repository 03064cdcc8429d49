//! Mock saver for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::saver::{SaveError, SaveSummary, Saver};
use crate::vacancy::VacancyRecord;

/// One recorded save call: record ids in order plus the destination.
#[derive(Debug, Clone)]
pub struct RecordedSave {
    pub ids: Vec<String>,
    pub destination: PathBuf,
}

/// Mock implementation of the `Saver` trait.
///
/// Records save calls for assertions and can fail the next save with a
/// configured error.
pub struct MockSaver {
    saves: Arc<RwLock<Vec<RecordedSave>>>,
    next_error: Arc<RwLock<Option<SaveError>>>,
}

impl Default for MockSaver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSaver {
    pub fn new() -> Self {
        Self {
            saves: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Configure the next save to fail with the given error.
    pub async fn set_next_error(&self, error: SaveError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn save_count(&self) -> usize {
        self.saves.read().await.len()
    }

    pub async fn recorded_saves(&self) -> Vec<RecordedSave> {
        self.saves.read().await.clone()
    }

    /// Record ids from the most recent save.
    pub async fn last_saved_ids(&self) -> Vec<String> {
        self.saves
            .read()
            .await
            .last()
            .map(|save| save.ids.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Saver for MockSaver {
    fn format(&self) -> &str {
        "mock"
    }

    async fn save(
        &self,
        records: &[VacancyRecord],
        destination: &Path,
    ) -> Result<SaveSummary, SaveError> {
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        self.saves.write().await.push(RecordedSave {
            ids: records.iter().map(|r| r.summary.id.clone()).collect(),
            destination: destination.to_path_buf(),
        });

        Ok(SaveSummary {
            path: destination.to_path_buf(),
            records: records.len(),
            bytes: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_records_saves_in_order() {
        let saver = MockSaver::new();
        let records = vec![
            fixtures::record("2", "b", "Acme", None),
            fixtures::record("1", "a", "Acme", None),
        ];

        saver.save(&records, Path::new("/tmp/out.json")).await.unwrap();
        assert_eq!(saver.save_count().await, 1);
        assert_eq!(saver.last_saved_ids().await, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_next_error_fires_once() {
        let saver = MockSaver::new();
        saver
            .set_next_error(SaveError::UnsupportedFormat("mock".to_string()))
            .await;

        assert!(saver.save(&[], Path::new("/tmp/x.json")).await.is_err());
        assert!(saver.save(&[], Path::new("/tmp/x.json")).await.is_ok());
        assert_eq!(saver.save_count().await, 1);
    }
}
