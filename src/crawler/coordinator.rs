//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives a crawl run through its phases:
//! - Loading the term list
//! - Fanning out one limiter-gated fetch task per term
//! - Recording each outcome in the result store as it completes
//! - Rewriting the result log sorted by frequency once every task is done

use crate::config::Config;
use crate::crawler::fetcher::{Fetch, FetchFailure, FetchOutcome, FrequencyFetcher};
use crate::crawler::limiter::ConcurrencyLimiter;
use crate::state::CrawlState;
use crate::storage::{Frequency, FrequencyResult, ResultStore};
use crate::terms::{load_terms, TermSet};
use crate::SpiderError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// How often (in completed terms) progress is logged
const PROGRESS_INTERVAL: usize = 100;

/// Summary of a run that reached `Done`
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Number of distinct terms loaded
    pub term_count: usize,

    /// One result per term, sorted by frequency descending
    pub results: Vec<FrequencyResult>,

    /// Result file location
    pub output_path: PathBuf,

    /// Whether the sorted rewrite reached disk
    pub persisted: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Terms with a real frequency
    pub fn resolved_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| !r.frequency.is_sentinel())
            .count()
    }

    /// Terms recorded with the sentinel
    pub fn failed_count(&self) -> usize {
        self.term_count - self.resolved_count()
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Main crawler coordinator structure
pub struct Coordinator<F: Fetch = FrequencyFetcher> {
    terms_path: PathBuf,
    output_path: PathBuf,
    fetcher: Arc<F>,
    limiter: ConcurrencyLimiter,
    state: CrawlState,
}

impl Coordinator<FrequencyFetcher> {
    /// Creates a coordinator that fetches from the configured endpoint
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `terms_path` - The term list; results are written beside it
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SpiderError)` - The HTTP client or endpoint could not be set up
    pub fn new(config: &Config, terms_path: impl Into<PathBuf>) -> Result<Self, SpiderError> {
        let fetcher = FrequencyFetcher::new(config)?;
        Ok(Self::with_fetcher(config, terms_path, fetcher))
    }
}

impl<F: Fetch> Coordinator<F> {
    /// Creates a coordinator around any fetch implementation
    pub fn with_fetcher(config: &Config, terms_path: impl Into<PathBuf>, fetcher: F) -> Self {
        let terms_path = terms_path.into();
        let output_path = config.output.path_for(&terms_path);

        Self {
            terms_path,
            output_path,
            fetcher: Arc::new(fetcher),
            limiter: ConcurrencyLimiter::new(config.crawler.concurrency_limit()),
            state: CrawlState::Idle,
        }
    }

    /// Current run phase
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Where results are logged and finally written
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Runs the crawl to completion
    ///
    /// Only a load failure ends the run early (`Aborted`); in that case no
    /// request is made and the output file is not touched. Past loading,
    /// per-term failures and persist failures are logged and the run always
    /// reaches `Done`.
    pub async fn run(&mut self) -> Result<CrawlReport, SpiderError> {
        let started_at = Utc::now();

        self.state.transition(CrawlState::Loading)?;
        let terms = match load_terms(&self.terms_path) {
            Ok(terms) => terms,
            Err(e) => {
                tracing::error!("Aborting crawl: {}", e);
                self.state.transition(CrawlState::Aborted)?;
                return Err(e);
            }
        };

        self.state.transition(CrawlState::Crawling)?;
        tracing::info!(
            "Crawling {} terms with concurrency {}, logging to {}",
            terms.len(),
            self.limiter.capacity(),
            self.output_path.display()
        );
        let store = Arc::new(ResultStore::new(&self.output_path));
        self.crawl(&terms, &store).await;

        self.state.transition(CrawlState::Finalizing)?;
        let persisted = match store.sorted_rewrite().await {
            Ok(count) => {
                tracing::info!(
                    "Wrote {} results sorted by frequency to {}",
                    count,
                    self.output_path.display()
                );
                true
            }
            Err(e) => {
                tracing::error!("{}; results remain in memory only", e);
                false
            }
        };

        self.state.transition(CrawlState::Done)?;
        let results = match Arc::try_unwrap(store) {
            Ok(store) => store.into_sorted(),
            Err(shared) => shared.sorted(),
        };

        Ok(CrawlReport {
            term_count: terms.len(),
            results,
            output_path: self.output_path.clone(),
            persisted,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Fetches every term and waits for all of them
    async fn crawl(&self, terms: &TermSet, store: &Arc<ResultStore>) {
        let mut tasks = JoinSet::new();

        for term in terms.iter().cloned() {
            let fetcher = Arc::clone(&self.fetcher);
            let limiter = self.limiter.clone();
            let store = Arc::clone(store);

            tasks.spawn(async move {
                let outcome = limiter.run(fetcher.fetch(&term)).await;
                record_outcome(&store, outcome).await;
            });
        }

        let total = terms.len();
        let mut completed = 0;
        while let Some(joined) = tasks.join_next().await {
            completed += 1;
            if let Err(e) = joined {
                tracing::error!("Fetch task failed: {}", e);
            }
            if completed % PROGRESS_INTERVAL == 0 {
                tracing::info!("Progress: {}/{} terms fetched", completed, total);
            }
        }

        // A task that died before recording still owes its term a result
        for term in terms {
            if store.get(term.as_str()).is_none() {
                let failure = FetchFailure::TaskFailed("no result was recorded".to_string());
                record_outcome(store, FetchOutcome::failed(term.clone(), failure)).await;
            }
        }

        tracing::info!("Crawl finished: {} terms recorded", store.len());
    }
}

/// Logs an outcome and writes it through to the store
async fn record_outcome(store: &ResultStore, outcome: FetchOutcome) {
    match &outcome.failure {
        None => tracing::info!("\"{}\" frequency: {}", outcome.term, outcome.frequency),
        Some(failure) => tracing::warn!(
            "Recording {} for \"{}\": {}",
            Frequency::SENTINEL,
            outcome.term,
            failure
        ),
    }

    if let Err(e) = store.record(outcome.term, outcome.frequency).await {
        tracing::warn!("{}", e);
    }
}

/// Runs a complete crawl of `terms_path` with the given configuration
///
/// # Example
///
/// ```no_run
/// use freq_spider::config::Config;
/// use freq_spider::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(&Config::default(), Path::new("words.txt")).await?;
/// println!("{} of {} terms resolved", report.resolved_count(), report.term_count);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, terms_path: &Path) -> Result<CrawlReport, SpiderError> {
    let mut coordinator = Coordinator::new(config, terms_path)?;
    coordinator.run().await
}
