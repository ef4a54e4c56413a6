//! Term definitions and loading
//!
//! A [`Term`] is one crawl unit. A [`TermSet`] is the deduplicated list of
//! terms read from a line-oriented source; it is built once and never
//! changed afterwards.

mod loader;

pub use loader::{load_terms, parse_terms};

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

/// A single word or phrase to look up
///
/// Identity is the exact string, case- and whitespace-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(String);

impl Term {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Term {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Deduplicated collection of terms
///
/// Terms keep the order of their first appearance so runs over the same
/// source dispatch in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet {
    terms: Vec<Term>,
}

impl TermSet {
    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t.as_str() == term)
    }
}

impl<T: Into<Term>> FromIterator<T> for TermSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let mut terms = Vec::new();
        for term in iter.into_iter().map(Into::into) {
            if seen.insert(term.clone()) {
                terms.push(term);
            }
        }
        Self { terms }
    }
}

impl IntoIterator for TermSet {
    type Item = Term;
    type IntoIter = std::vec::IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a TermSet {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
