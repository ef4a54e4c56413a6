//! Storage module for persisting crawl results
//!
//! This module handles:
//! - The in-memory result map shared by all fetch tasks
//! - The append-only result log written as terms complete
//! - The final frequency-sorted rewrite of that log
//! - Reading result files back for statistics

mod result_store;

pub use result_store::ResultStore;

use crate::terms::Term;
use crate::SpiderError;
use std::fmt;
use std::path::Path;

/// Corpus occurrence count of a term, or the failure sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(i64);

impl Frequency {
    /// Marks a term whose fetch or parse failed
    pub const SENTINEL: Frequency = Frequency(-1);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }

    pub const fn is_sentinel(&self) -> bool {
        self.0 == Self::SENTINEL.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One term paired with its recorded frequency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyResult {
    pub term: Term,
    pub frequency: Frequency,
}

impl FrequencyResult {
    pub fn new(term: impl Into<Term>, frequency: Frequency) -> Self {
        Self {
            term: term.into(),
            frequency,
        }
    }
}

/// Formats a result as a `term<TAB>frequency` line (without the newline)
pub fn format_line(result: &FrequencyResult) -> String {
    format!("{}\t{}", result.term, result.frequency)
}

/// Parses a `term<TAB>frequency` line
///
/// The split happens at the last tab, so terms that contain tabs survive.
pub fn parse_line(line: &str) -> Option<FrequencyResult> {
    let (term, frequency) = line.rsplit_once('\t')?;
    let frequency = frequency.trim_end_matches('\r').parse::<i64>().ok()?;
    Some(FrequencyResult::new(term, Frequency::new(frequency)))
}

/// Reads a result file (append-log or final sorted file) in file order
///
/// Lines that do not parse are skipped.
pub fn read_frequency_file(path: &Path) -> Result<Vec<FrequencyResult>, SpiderError> {
    let content = std::fs::read_to_string(path).map_err(|source| SpiderError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut results = Vec::new();
    for (number, line) in content.lines().enumerate() {
        match parse_line(line) {
            Some(result) => results.push(result),
            None => tracing::debug!(
                "Skipping malformed line {} in {}",
                number + 1,
                path.display()
            ),
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_sorts_below_counts() {
        assert!(Frequency::SENTINEL < Frequency::new(0));
        assert!(Frequency::SENTINEL.is_sentinel());
        assert!(!Frequency::new(0).is_sentinel());
    }

    #[test]
    fn test_format_line() {
        let result = FrequencyResult::new("语言", Frequency::new(1024));
        assert_eq!(format_line(&result), "语言\t1024");

        let failed = FrequencyResult::new("qzx", Frequency::SENTINEL);
        assert_eq!(format_line(&failed), "qzx\t-1");
    }

    #[test]
    fn test_parse_line() {
        let parsed = parse_line("hello world\t42").unwrap();
        assert_eq!(parsed.term.as_str(), "hello world");
        assert_eq!(parsed.frequency, Frequency::new(42));

        let with_tab = parse_line("a\tb\t-1").unwrap();
        assert_eq!(with_tab.term.as_str(), "a\tb");
        assert!(with_tab.frequency.is_sentinel());

        let empty_term = parse_line("\t7").unwrap();
        assert_eq!(empty_term.term.as_str(), "");
    }

    #[test]
    fn test_parse_line_rejects_garbage() {
        assert!(parse_line("no tab here").is_none());
        assert!(parse_line("term\tmany").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn test_read_frequency_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.txt");
        std::fs::write(&path, "b\t9\r\nbroken\na\t5\n").unwrap();

        let results = read_frequency_file(&path).unwrap();
        assert_eq!(
            results,
            vec![
                FrequencyResult::new("b", Frequency::new(9)),
                FrequencyResult::new("a", Frequency::new(5)),
            ]
        );
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_frequency_file(Path::new("/nonexistent/freq.txt"));
        assert!(matches!(result, Err(SpiderError::SourceUnreadable { .. })));
    }
}
