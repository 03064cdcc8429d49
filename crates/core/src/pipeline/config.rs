//! Pipeline orchestrator configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Upper bound on concurrent detail fetches.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Directory for chart artifacts. When unset, a `charts` directory next
    /// to the records destination is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charts_dir: Option<PathBuf>,
}

fn default_max_concurrent_fetches() -> usize {
    8
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
            charts_dir: None,
        }
    }
}
