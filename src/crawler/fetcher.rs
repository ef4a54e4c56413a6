//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured timeout and user agent
//! - Addressing one GET per term against the search endpoint
//! - Classifying transport failures
//! - Handing the body to a [`FrequencyExtractor`]
//!
//! A fetch never fails outright: every failure becomes the sentinel
//! frequency plus a [`FetchFailure`] describing what went wrong.

use crate::config::Config;
use crate::crawler::extract::{ExtractError, FrequencyExtractor, MarkerExtractor};
use crate::storage::Frequency;
use crate::terms::Term;
use crate::{ConfigError, SpiderError};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Why a term ended up with the sentinel frequency
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("cannot address term under {0}")]
    InvalidEndpoint(String),

    /// Dot segments are normalized away by URL parsing, even percent-encoded
    #[error("\"{0}\" cannot be sent as a path segment")]
    UnaddressableTerm(String),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("fetch task failed: {0}")]
    TaskFailed(String),
}

/// Result of fetching one term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub term: Term,
    pub frequency: Frequency,
    /// Diagnostics only; set exactly when `frequency` is the sentinel
    pub failure: Option<FetchFailure>,
}

impl FetchOutcome {
    pub fn resolved(term: Term, frequency: Frequency) -> Self {
        Self {
            term,
            frequency,
            failure: None,
        }
    }

    pub fn failed(term: Term, failure: FetchFailure) -> Self {
        Self {
            term,
            frequency: Frequency::SENTINEL,
            failure: Some(failure),
        }
    }
}

/// Anything that can look up the frequency of a term
///
/// Implementations must not panic or return early without an outcome; all
/// failures are reported through [`FetchOutcome::failed`].
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, term: &Term) -> impl Future<Output = FetchOutcome> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use freq_spider::config::Config;
/// use freq_spider::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.endpoint.user_agent.as_str())
        .timeout(config.crawler.request_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches term frequencies from the corpus search endpoint
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct FrequencyFetcher {
    client: Client,
    base_url: Url,
    extractor: Arc<dyn FrequencyExtractor>,
}

impl std::fmt::Debug for FrequencyFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyFetcher")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl FrequencyFetcher {
    /// Creates a fetcher for the configured endpoint using [`MarkerExtractor`]
    pub fn new(config: &Config) -> Result<Self, SpiderError> {
        let base_url = Url::parse(&config.endpoint.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid base-url '{}': {}",
                config.endpoint.base_url, e
            ))
        })?;
        let client = build_http_client(config)?;

        Ok(Self {
            client,
            base_url,
            extractor: Arc::new(MarkerExtractor),
        })
    }

    /// Replaces the response extractor
    pub fn with_extractor(mut self, extractor: impl FrequencyExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// URL for one term: the base endpoint plus the term as a single path segment
    pub fn request_url(&self, term: &Term) -> Result<Url, FetchFailure> {
        if matches!(term.as_str(), "." | "..") {
            return Err(FetchFailure::UnaddressableTerm(term.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchFailure::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .push(term.as_str());
        Ok(url)
    }

    /// Fetches one term, converting every failure into the sentinel
    ///
    /// Exactly one request is made; nothing is retried.
    pub async fn fetch_frequency(&self, term: &Term) -> FetchOutcome {
        match self.try_fetch(term).await {
            Ok(frequency) => FetchOutcome::resolved(term.clone(), frequency),
            Err(failure) => FetchOutcome::failed(term.clone(), failure),
        }
    }

    async fn try_fetch(&self, term: &Term) -> Result<Frequency, FetchFailure> {
        let url = self.request_url(term)?;
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url).send().await.map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchFailure::Timeout
            } else {
                FetchFailure::Body(e.to_string())
            }
        })?;

        Ok(self.extractor.extract(term, &body)?)
    }
}

impl Fetch for FrequencyFetcher {
    fn fetch(&self, term: &Term) -> impl Future<Output = FetchOutcome> + Send {
        self.fetch_frequency(term)
    }
}

/// Maps a transport error onto a failure kind
fn classify_error(e: reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_connect() {
        FetchFailure::Connect(e.to_string())
    } else {
        FetchFailure::Transport(e.to_string())
    }
}
