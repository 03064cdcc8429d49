//! Types for the persistence stage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::vacancy::VacancyRecord;

/// Errors that can occur while persisting records.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("unsupported destination format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to encode records: {0}")]
    Encode(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a successful save produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSummary {
    pub path: PathBuf,
    pub records: usize,
    pub bytes: u64,
}

/// Trait for persistence backends.
///
/// Implementations must be atomic with respect to partial writes: either the
/// whole batch lands at the destination or a pre-existing destination stays
/// untouched.
#[async_trait]
pub trait Saver: Send + Sync {
    /// Format identifier, e.g. `"json"`.
    fn format(&self) -> &str;

    /// Persist the records to the destination path.
    async fn save(
        &self,
        records: &[VacancyRecord],
        destination: &Path,
    ) -> Result<SaveSummary, SaveError>;
}
