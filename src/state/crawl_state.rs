/// Crawl run state definitions
///
/// A run moves `Idle -> Loading -> Crawling -> Finalizing -> Done`, or ends in
/// `Aborted` when loading fails. Once loading succeeds the run always reaches
/// `Done`.
use crate::SpiderError;
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlState {
    // ===== Active States =====
    /// Run created but not started
    #[default]
    Idle,

    /// Reading the term list
    Loading,

    /// Fetch tasks are in flight
    Crawling,

    /// All fetches done; the sorted rewrite is running
    Finalizing,

    // ===== Terminal States =====
    /// Run completed (even if the final rewrite could not be persisted)
    Done,

    /// Term list could not be loaded; nothing was fetched or written
    Aborted,
}

impl CrawlState {
    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Loading)
                | (Self::Loading, Self::Crawling)
                | (Self::Loading, Self::Aborted)
                | (Self::Crawling, Self::Finalizing)
                | (Self::Finalizing, Self::Done)
        )
    }

    /// Moves to `next`, rejecting transitions the state machine does not allow
    pub fn transition(&mut self, next: CrawlState) -> Result<(), SpiderError> {
        if !self.can_transition_to(next) {
            return Err(SpiderError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        tracing::debug!("Crawl state: {} -> {}", self, next);
        *self = next;
        Ok(())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Crawling => "crawling",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
