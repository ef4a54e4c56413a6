//! Crawler module for term frequency fetching
//!
//! This module contains the core crawling logic, including:
//! - Frequency extraction from search result pages
//! - HTTP fetching with per-request timeouts
//! - Concurrency limiting via a semaphore
//! - Overall crawl coordination

mod coordinator;
mod extract;
mod fetcher;
mod limiter;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use extract::{ExtractError, FrequencyExtractor, MarkerExtractor};
pub use fetcher::{build_http_client, Fetch, FetchFailure, FetchOutcome, FrequencyFetcher};
pub use limiter::{ConcurrencyLimiter, LimiterPermit};

use crate::config::Config;
use crate::SpiderError;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client for the configured endpoint
/// 2. Load and deduplicate the term list
/// 3. Fetch every term, at most `concurrency` at a time
/// 4. Log each result to the output file as it arrives
/// 5. Rewrite the output file sorted by frequency
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `terms_path` - Path to the term list
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl reached `Done`
/// * `Err(SpiderError)` - Setup failed or the term list could not be loaded
pub async fn crawl(config: &Config, terms_path: &Path) -> Result<CrawlReport, SpiderError> {
    run_crawl(config, terms_path).await
}
