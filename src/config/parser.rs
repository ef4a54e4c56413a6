use crate::config::types::Config;
use crate::config::validation::{apply_defaults, validate};
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Out-of-range concurrency and timeout values are replaced with their
/// defaults; everything else must validate.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use freq_spider::config::load_config;
///
/// let config = load_config(Path::new("spider.toml")).unwrap();
/// println!("Concurrency: {}", config.crawler.concurrency);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(content)?;
    apply_defaults(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Parses a numeric setting typed by the operator
///
/// Returns `None` for anything that is not a positive integer, so the caller
/// can fall back to a default instead of failing.
pub fn parse_setting(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|value| *value >= 1)
}

/// Applies raw command-line overrides for concurrency and timeout
///
/// Invalid values are logged and replaced with the built-in defaults.
pub fn apply_overrides(config: &mut Config, concurrency: Option<&str>, timeout: Option<&str>) {
    if let Some(raw) = concurrency {
        config.crawler.concurrency = match parse_setting(raw) {
            Some(value) => value,
            None => {
                tracing::warn!(
                    "Invalid concurrency '{}', using default {}",
                    raw,
                    crate::config::DEFAULT_CONCURRENCY
                );
                crate::config::DEFAULT_CONCURRENCY
            }
        };
    }

    if let Some(raw) = timeout {
        config.crawler.timeout_secs = match parse_setting(raw) {
            Some(value) => value,
            None => {
                tracing::warn!(
                    "Invalid timeout '{}', using default {}s",
                    raw,
                    crate::config::DEFAULT_TIMEOUT_SECS
                );
                crate::config::DEFAULT_TIMEOUT_SECS
            }
        };
    }
}
