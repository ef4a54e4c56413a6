//! Concurrency limiting for fetches
//!
//! A counting semaphore admits at most N fetches at once. Admission hands out
//! a permit that is released when dropped, so a slot frees up on every exit
//! path: normal return, early return, panic, or cancellation.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounds the number of simultaneously running fetches
///
/// Clones share the same slots.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// A granted slot; dropping it frees the slot
#[derive(Debug)]
pub struct LimiterPermit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyLimiter {
    /// Creates a limiter with `capacity` slots
    ///
    /// Zero is treated as one, and anything above [`Semaphore::MAX_PERMITS`]
    /// is clamped to it.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Configured number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots not currently held
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Waits for a free slot
    ///
    /// Waiters are admitted in FIFO order, so no caller starves.
    pub async fn acquire(&self) -> LimiterPermit {
        // The semaphore is private and never closed
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("limiter semaphore is never closed");
        LimiterPermit { _permit: permit }
    }

    /// Runs `task` while holding a slot
    ///
    /// The slot is held for exactly the lifetime of the task and released
    /// however the task ends.
    pub async fn run<F: Future>(&self, task: F) -> F::Output {
        let _permit = self.acquire().await;
        tracing::trace!(
            "Slot acquired, {} of {} free",
            self.available(),
            self.capacity
        );
        task.await
    }
}
