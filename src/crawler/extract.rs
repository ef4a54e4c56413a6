//! Frequency extraction from search result pages
//!
//! The corpus search page echoes the queried term in an input field and
//! reports the hit count in a `totalnum` field. Both markers must be present
//! for a count to be trusted.

use crate::storage::Frequency;
use crate::terms::Term;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static FREQUENCY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"totalnum" value="(\d+)"#).expect("frequency marker pattern is valid")
});

/// Reasons a response body yields no frequency
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The page does not echo the term, e.g. it contains characters the service rejects
    #[error("the service did not recognize \"{0}\"")]
    TermNotRecognized(String),

    /// The page has no count field for the term
    #[error("the page has no frequency for \"{0}\"")]
    FrequencyMissing(String),

    /// The count field does not fit a frequency
    #[error("frequency \"{value}\" for \"{term}\" is out of range")]
    FrequencyInvalid { term: String, value: String },
}

/// Turns a response body into a frequency for one term
pub trait FrequencyExtractor: Send + Sync {
    fn extract(&self, term: &Term, body: &str) -> Result<Frequency, ExtractError>;
}

/// Extractor for the corpus search page markup
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerExtractor;

impl FrequencyExtractor for MarkerExtractor {
    fn extract(&self, term: &Term, body: &str) -> Result<Frequency, ExtractError> {
        let term_marker = format!("input\" value=\"{}", term);
        if !body.contains(&term_marker) {
            return Err(ExtractError::TermNotRecognized(term.to_string()));
        }

        let digits = FREQUENCY_MARKER
            .captures(body)
            .and_then(|captures| captures.get(1))
            .ok_or_else(|| ExtractError::FrequencyMissing(term.to_string()))?
            .as_str();

        digits
            .parse::<i64>()
            .map(Frequency::new)
            .map_err(|_| ExtractError::FrequencyInvalid {
                term: term.to_string(),
                value: digits.to_string(),
            })
    }
}
