//! Configuration module for Freq-Spider
//!
//! Settings come from built-in defaults, an optional TOML file, and raw
//! command-line overrides, in that order.
//!
//! # Example
//!
//! ```no_run
//! use freq_spider::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("spider.toml")).unwrap();
//! println!("Fetching with {} slots", config.crawler.concurrency_limit());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, EndpointConfig, OutputConfig, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY,
    DEFAULT_OUTPUT_FILE, DEFAULT_TIMEOUT_SECS, MAX_CONCURRENCY,
};

// Re-export parser functions
pub use parser::{apply_overrides, load_config, parse_config, parse_setting};
pub use validation::{apply_defaults, validate};
