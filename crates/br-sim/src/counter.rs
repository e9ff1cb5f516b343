//! `CompletionCounter` — crossings finished so far, and the run's stop rule.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic count of completed crossings.
///
/// Written only by the scheduler; read by everyone else (snapshots, the
/// termination check).
#[derive(Debug)]
pub struct CompletionCounter {
    done:   AtomicU64,
    target: u64,
}

impl CompletionCounter {
    pub fn new(target: u64) -> Self {
        Self { done: AtomicU64::new(0), target }
    }

    /// Record one crossing and return the new total.
    #[inline]
    pub fn record(&self) -> u64 {
        self.done.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.done.load(Ordering::Acquire)
    }

    #[inline]
    pub fn target(&self) -> u64 {
        self.target
    }

    /// `true` once the target has been met.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.count() >= self.target
    }
}
