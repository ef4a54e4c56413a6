use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Concurrency used when none (or an invalid one) is configured
pub const DEFAULT_CONCURRENCY: i64 = 1;

/// Largest concurrency the limiter can hold; larger settings are clamped to it
pub const MAX_CONCURRENCY: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Per-request timeout in seconds used when none (or an invalid one) is configured
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;

/// Search endpoint every term is appended to
pub const DEFAULT_BASE_URL: &str = "https://bcc.blcu.edu.cn/zh/search/0/";

/// Name of the result file written next to the term list
pub const DEFAULT_OUTPUT_FILE: &str = "freq.txt";

/// Main configuration structure for Freq-Spider
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub endpoint: EndpointConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
///
/// Values are kept signed so out-of-range input survives parsing and can be
/// defaulted by validation instead of rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent fetches
    pub concurrency: i64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: i64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CrawlerConfig {
    /// Number of limiter slots, falling back to the default for values below 1
    /// and clamped to [`MAX_CONCURRENCY`]
    pub fn concurrency_limit(&self) -> usize {
        if self.concurrency < 1 {
            return DEFAULT_CONCURRENCY as usize;
        }
        usize::try_from(self.concurrency)
            .unwrap_or(usize::MAX)
            .min(MAX_CONCURRENCY)
    }

    /// Per-request timeout, falling back to the default for values below 1
    pub fn request_timeout(&self) -> Duration {
        let secs = if self.timeout_secs < 1 {
            DEFAULT_TIMEOUT_SECS
        } else {
            self.timeout_secs
        };
        Duration::from_secs(secs as u64)
    }
}

/// Remote search endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL each term is appended to as a path segment
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("freq-spider/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name of the result log, created beside the term list
    #[serde(rename = "file-name")]
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl OutputConfig {
    /// Resolves the result file path for a given term list
    pub fn path_for(&self, terms_path: &Path) -> PathBuf {
        let directory = terms_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        directory.join(&self.file_name)
    }
}
