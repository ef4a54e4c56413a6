//! Output module for crawl summaries
//!
//! This module handles:
//! - Summarizing result lists into statistics
//! - Printing statistics for a finished run or an existing result file

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics, DEFAULT_TOP_TERMS};

use crate::storage::read_frequency_file;
use crate::SpiderError;
use std::path::Path;

/// Loads statistics from a result file
///
/// # Arguments
///
/// * `path` - A result file written by a previous (possibly interrupted) run
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Successfully summarized the file
/// * `Err(SpiderError)` - The file could not be read
pub fn load_statistics(path: &Path) -> Result<CrawlStatistics, SpiderError> {
    let results = read_frequency_file(path)?;
    Ok(CrawlStatistics::from_results(&results, DEFAULT_TOP_TERMS))
}
