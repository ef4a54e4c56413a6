use crate::config::types::{
    Config, CrawlerConfig, EndpointConfig, OutputConfig, DEFAULT_CONCURRENCY,
    DEFAULT_TIMEOUT_SECS, MAX_CONCURRENCY,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_endpoint_config(&config.endpoint)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Replaces out-of-range crawler settings with their defaults
///
/// Returns the number of settings that were replaced.
pub fn apply_defaults(config: &mut Config) -> usize {
    default_crawler_config(&mut config.crawler)
}

fn default_crawler_config(config: &mut CrawlerConfig) -> usize {
    let mut replaced = 0;

    if config.concurrency < 1 {
        tracing::warn!(
            "concurrency must be >= 1, got {}; using default {}",
            config.concurrency,
            DEFAULT_CONCURRENCY
        );
        config.concurrency = DEFAULT_CONCURRENCY;
        replaced += 1;
    } else if config.concurrency as u64 > MAX_CONCURRENCY as u64 {
        tracing::warn!(
            "concurrency {} exceeds the limit of {}; clamping",
            config.concurrency,
            MAX_CONCURRENCY
        );
        config.concurrency = MAX_CONCURRENCY as i64;
        replaced += 1;
    }

    if config.timeout_secs < 1 {
        tracing::warn!(
            "timeout-secs must be >= 1, got {}; using default {}",
            config.timeout_secs,
            DEFAULT_TIMEOUT_SECS
        );
        config.timeout_secs = DEFAULT_TIMEOUT_SECS;
        replaced += 1;
    }

    replaced
}

/// Validates the endpoint configuration
fn validate_endpoint_config(config: &EndpointConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' cannot have path segments appended",
            config.base_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.file_name.is_empty() {
        return Err(ConfigError::Validation(
            "file-name cannot be empty".to_string(),
        ));
    }

    if config.file_name.contains('/') || config.file_name.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "file-name must be a bare file name, got '{}'",
            config.file_name
        )));
    }

    Ok(())
}
