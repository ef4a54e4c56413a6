//! Statistics over crawl results
//!
//! This module summarizes a result list, either from a finished run or read
//! back from a result file, and prints it for the operator.

use crate::storage::FrequencyResult;

/// Number of highest-frequency terms kept in a summary
pub const DEFAULT_TOP_TERMS: usize = 10;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Total number of terms with a recorded result
    pub total_terms: usize,

    /// Terms with a real frequency
    pub resolved: usize,

    /// Terms recorded with the sentinel
    pub failed: usize,

    /// Sum of all resolved frequencies
    pub total_frequency: i128,

    /// Highest-frequency resolved terms, descending
    pub top_terms: Vec<FrequencyResult>,
}

impl CrawlStatistics {
    /// Builds statistics from results in any order
    ///
    /// Ties in `top_terms` keep their order in `results`.
    pub fn from_results(results: &[FrequencyResult], top: usize) -> Self {
        let mut resolved: Vec<&FrequencyResult> = results
            .iter()
            .filter(|r| !r.frequency.is_sentinel())
            .collect();
        let total_frequency = resolved
            .iter()
            .map(|r| i128::from(r.frequency.value()))
            .sum::<i128>();

        resolved.sort_by(|a, b| b.frequency.cmp(&a.frequency));

        Self {
            total_terms: results.len(),
            resolved: resolved.len(),
            failed: results.len() - resolved.len(),
            total_frequency,
            top_terms: resolved.into_iter().take(top).cloned().collect(),
        }
    }

    /// Percentage of terms that resolved
    pub fn success_rate(&self) -> f64 {
        if self.total_terms == 0 {
            0.0
        } else {
            (self.resolved as f64 / self.total_terms as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Terms: {}", stats.total_terms);
    println!("  Resolved: {}", stats.resolved);
    println!("  Failed (-1): {}", stats.failed);
    println!("  Total frequency: {}", stats.total_frequency);
    println!();

    if !stats.top_terms.is_empty() {
        println!("Top Terms:");
        for (rank, result) in stats.top_terms.iter().enumerate() {
            println!("  {:>3}. {}\t{}", rank + 1, result.term, result.frequency);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} terms resolved)",
        stats.success_rate(),
        stats.resolved,
        stats.total_terms
    );
}
