use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::pipeline::PipelineConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Listing-service client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListingConfig {
    /// Base URL of the listing REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.hh.ru".to_string()
}

fn default_user_agent() -> String {
    concat!("vacanza/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Retry behaviour for transient listing-service failures
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts, the first one included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff_factor: default_backoff_factor(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_backoff_factor() -> f64 {
    2.0
}

fn default_max_delay_ms() -> u64 {
    30_000
}

/// Search strategy selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Sequential,
    Concurrent,
}

/// Search stage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: SearchMode,
    /// Region code understood by the listing service
    #[serde(default = "default_area")]
    pub area: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Optional cap on collected vacancies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    /// Pause between page requests in sequential mode
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    /// Concurrency bound for page requests in concurrent mode
    #[serde(default = "default_max_concurrent_pages")]
    pub max_concurrent_pages: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            area: default_area(),
            per_page: default_per_page(),
            max_pages: default_max_pages(),
            max_results: None,
            page_delay_ms: default_page_delay_ms(),
            max_concurrent_pages: default_max_concurrent_pages(),
        }
    }
}

fn default_area() -> u32 {
    1
}

fn default_per_page() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    20
}

fn default_page_delay_ms() -> u64 {
    500
}

fn default_max_concurrent_pages() -> usize {
    5
}

/// Analysis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Keywords matched against descriptions; the analyzer's built-in list
    /// applies when empty
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Entries per chart
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            top_n: default_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    20
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for default destinations when the caller gives none
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./result")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.listing.base_url, "https://api.hh.ru");
        assert_eq!(config.listing.timeout_secs, 30);
        assert_eq!(config.listing.retry.max_attempts, 3);
        assert_eq!(config.search.mode, SearchMode::Sequential);
        assert_eq!(config.search.per_page, 100);
        assert_eq!(config.pipeline.max_concurrent_fetches, 8);
        assert_eq!(config.analysis.top_n, 20);
        assert_eq!(config.output.dir, PathBuf::from("./result"));
    }

    #[test]
    fn test_search_mode_deserialization() {
        let config: SearchConfig = toml::from_str(r#"mode = "concurrent""#).unwrap();
        assert_eq!(config.mode, SearchMode::Concurrent);
    }
}
