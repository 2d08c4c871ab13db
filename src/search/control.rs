//! Deadline and cooperative cancellation for a single search

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag a caller can set to abandon a running search early.
///
/// Clones share the same flag, so one handle can be given to a background
/// search and the other kept by whoever may want to stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next node boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything the search polls to decide whether to keep going.
#[derive(Debug)]
pub struct SearchControl {
    start: Instant,
    budget: Duration,
    cancel: CancelToken,
}

impl SearchControl {
    /// Start the clock now.
    pub fn new(budget: Duration, cancel: CancelToken) -> Self {
        Self {
            start: Instant::now(),
            budget,
            cancel,
        }
    }

    /// True once the budget is spent or cancellation was requested.
    #[inline]
    pub fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.start.elapsed() > self.budget
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }
}
