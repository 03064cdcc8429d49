use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - listing base URL and timeout
/// - search paging bounds (the listing service caps per_page at 100)
/// - worker pool sizes
/// - retry backoff factor
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.listing.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "listing.base_url cannot be empty".to_string(),
        ));
    }
    if config.listing.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "listing.timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.listing.retry.backoff_factor < 1.0 {
        return Err(ConfigError::ValidationError(
            "listing.retry.backoff_factor must be >= 1.0".to_string(),
        ));
    }

    if config.search.per_page == 0 || config.search.per_page > 100 {
        return Err(ConfigError::ValidationError(
            "search.per_page must be between 1 and 100".to_string(),
        ));
    }
    if config.search.max_pages == 0 {
        return Err(ConfigError::ValidationError(
            "search.max_pages cannot be 0".to_string(),
        ));
    }
    if config.search.max_concurrent_pages == 0 {
        return Err(ConfigError::ValidationError(
            "search.max_concurrent_pages cannot be 0".to_string(),
        ));
    }

    if config.pipeline.max_concurrent_fetches == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.max_concurrent_fetches cannot be 0".to_string(),
        ));
    }

    Ok(())
}
