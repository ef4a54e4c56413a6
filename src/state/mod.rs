//! State module for tracking crawl progress
//!
//! `CrawlState` is the run-level state machine driven by the coordinator.

mod crawl_state;

pub use crawl_state::CrawlState;
