//! Freq-Spider: a concurrent term-frequency crawler
//!
//! This crate looks up corpus frequencies for a list of terms against a fixed
//! search endpoint, bounding the number of in-flight requests, isolating
//! per-term failures, and logging every result to disk as soon as it arrives.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod terms;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Freq-Spider operations
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read term list {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Term list {} contains no terms", path.display())]
    EmptySource { path: PathBuf },

    #[error("Failed to persist results to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Freq-Spider operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlReport, FrequencyFetcher};
pub use state::CrawlState;
pub use storage::{Frequency, FrequencyResult, ResultStore};
pub use terms::{load_terms, Term, TermSet};
