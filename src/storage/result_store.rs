use crate::storage::{format_line, Frequency, FrequencyResult};
use crate::terms::Term;
use crate::SpiderError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Results in completion order plus a term index into them
#[derive(Debug, Default)]
struct Entries {
    ordered: Vec<FrequencyResult>,
    index: HashMap<Term, usize>,
}

/// Thread-safe term → frequency map backed by an append-only log file
///
/// Every [`record`](ResultStore::record) updates memory and appends one
/// line to the log under the same lock, so a crash mid-run leaves every
/// completed result on disk and the log lists results in the same order
/// that breaks sort ties. [`sorted_rewrite`](ResultStore::sorted_rewrite) replaces
/// the log with the final frequency-descending listing.
#[derive(Debug)]
pub struct ResultStore {
    path: PathBuf,
    entries: Mutex<Entries>,
    /// Serializes file access so lines are never interleaved
    file_lock: tokio::sync::Mutex<()>,
}

impl ResultStore {
    /// Creates an empty store logging to `path`
    ///
    /// The file is not touched until the first result is recorded. Existing
    /// content is appended to, and replaced by the sorted rewrite.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(Entries::default()),
            file_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a result in memory and appends it to the log
    ///
    /// The in-memory insert-or-overwrite always happens; an `Err` only means
    /// the log line could not be written.
    pub async fn record(&self, term: Term, frequency: Frequency) -> Result<(), SpiderError> {
        let result = FrequencyResult { term, frequency };
        let line = format!("{}\n", format_line(&result));

        let _guard = self.file_lock.lock().await;
        {
            let mut entries = self.entries();
            match entries.index.get(&result.term).copied() {
                Some(position) => entries.ordered[position].frequency = frequency,
                None => {
                    let position = entries.ordered.len();
                    entries.index.insert(result.term.clone(), position);
                    entries.ordered.push(result);
                }
            }
        }

        self.append(line.as_bytes()).await.map_err(|source| SpiderError::Persist {
            path: self.path.clone(),
            source,
        })
    }

    async fn append(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await
    }

    /// Number of distinct terms recorded
    pub fn len(&self) -> usize {
        self.entries().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recorded frequency for `term`, if any
    pub fn get(&self, term: &str) -> Option<Frequency> {
        let entries = self.entries();
        entries
            .index
            .get(term)
            .map(|&position| entries.ordered[position].frequency)
    }

    /// Results sorted by frequency descending; ties keep completion order
    pub fn sorted(&self) -> Vec<FrequencyResult> {
        let mut results = self.entries().ordered.clone();
        results.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        results
    }

    /// Consumes the store, returning the sorted results
    pub fn into_sorted(self) -> Vec<FrequencyResult> {
        let mut results = self
            .entries
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .ordered;
        results.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        results
    }

    /// Overwrites the log with every result, sorted by frequency descending
    ///
    /// The listing is written to a sibling temporary file first and renamed
    /// over the log, so a failure here leaves the append-log intact.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of lines written
    /// * `Err(SpiderError::Persist)` - The file could not be written or renamed
    pub async fn sorted_rewrite(&self) -> Result<usize, SpiderError> {
        let results = self.sorted();
        let mut listing = String::new();
        for result in &results {
            listing.push_str(&format_line(result));
            listing.push('\n');
        }

        let _guard = self.file_lock.lock().await;
        let temp_path = self.temp_path();
        let persist_error = |source: std::io::Error| SpiderError::Persist {
            path: self.path.clone(),
            source,
        };

        tokio::fs::write(&temp_path, listing.as_bytes())
            .await
            .map_err(persist_error)?;
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(persist_error(e));
        }

        tracing::debug!(
            "Rewrote {} with {} sorted results",
            self.path.display(),
            results.len()
        );
        Ok(results.len())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
