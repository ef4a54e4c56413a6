use crate::terms::TermSet;
use crate::SpiderError;
use std::path::Path;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Loads the term list at `path`
///
/// Each line becomes one candidate term; only the line ending is removed.
///
/// # Returns
///
/// * `Ok(TermSet)` - At least one distinct term was read
/// * `Err(SpiderError::SourceUnreadable)` - The file is missing, unreadable, or not UTF-8
/// * `Err(SpiderError::EmptySource)` - The file holds no lines at all
pub fn load_terms(path: &Path) -> Result<TermSet, SpiderError> {
    let content = std::fs::read_to_string(path).map_err(|source| SpiderError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let terms = parse_terms(&content);
    if terms.is_empty() {
        return Err(SpiderError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    tracing::info!(
        "Loaded {} distinct terms from {}",
        terms.len(),
        path.display()
    );
    Ok(terms)
}

/// Splits text into a deduplicated term set
///
/// Lines end at `\n` or `\r\n`. Blank lines yield the empty term. A leading
/// byte-order mark is dropped.
pub fn parse_terms(content: &str) -> TermSet {
    content
        .strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(content)
        .lines()
        .collect()
}
