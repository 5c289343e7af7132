//! Upstream concurrency limiting.
//!
//! Wraps a fair `tokio::sync::Semaphore` so at most N upstream fetches run
//! at once, regardless of inbound request rate. Excess callers queue in
//! arrival order and are admitted as slots free up. The permit is held for
//! the duration of the wrapped future and released when it settles, on
//! success and failure alike.

use std::future::Future;

use tokio::sync::Semaphore;

/// Default number of concurrent upstream fetches.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 6;

/// Bounds the number of simultaneously running upstream fetches.
pub struct FetchLimiter {
    semaphore: Semaphore,
    capacity: usize,
}

impl FetchLimiter {
    /// Create a limiter admitting at most `capacity` concurrent tasks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-slot limiter could never admit
    /// anything.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "limiter capacity must be non-zero");
        Self {
            semaphore: Semaphore::new(capacity),
            capacity,
        }
    }

    /// Run `task` once a slot is free.
    ///
    /// Suspends until a permit is available; tokio's semaphore is fair, so
    /// queued callers are admitted in arrival order and none starves. The
    /// permit is tied to this call's scope, so a failing or cancelled task
    /// releases its slot exactly as a successful one does.
    pub async fn run<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("limiter semaphore closed");
        task.await
    }

    /// Configured slot count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
