//! Blocking primitives built on `parking_lot`: the run-wide shutdown flag and
//! the binary crossing permit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

// ── ShutdownSignal ────────────────────────────────────────────────────────────

/// One-way cancellation flag.  Once cancelled it stays cancelled.
///
/// Sleepers blocked in [`wait_for`](Self::wait_for) wake immediately on
/// cancellation instead of finishing their interval.
pub struct ShutdownSignal {
    cancelled: AtomicBool,
    mutex:     Mutex<()>,
    condvar:   Condvar,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            mutex:     Mutex::new(()),
            condvar:   Condvar::new(),
        }
    }

    pub fn cancel(&self) {
        let _guard = self.mutex.lock();
        self.cancelled.store(true, Ordering::Release);
        self.condvar.notify_all();
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Sleep for `timeout` or until cancelled, whichever comes first.
    /// Returns `true` if the signal is cancelled on return.
    ///
    /// A timeout too large to represent as a deadline waits for
    /// cancellation alone.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        if self.is_cancelled() || timeout.is_zero() {
            return self.is_cancelled();
        }
        let deadline = Instant::now().checked_add(timeout);
        let mut guard = self.mutex.lock();
        while !self.is_cancelled() {
            match deadline {
                Some(deadline) => {
                    if self.condvar.wait_until(&mut guard, deadline).timed_out() {
                        break;
                    }
                }
                None => self.condvar.wait(&mut guard),
            }
        }
        self.is_cancelled()
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancels the signal when dropped, including during a panic unwind, so a
/// failing thread always releases its peers.
pub(crate) struct CancelOnDrop<'a>(pub(crate) &'a ShutdownSignal);

impl Drop for CancelOnDrop<'_> {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

// ── CrossingPermit ────────────────────────────────────────────────────────────

/// Binary semaphore guarding the transit area for a whole epoch.
///
/// Not guard-based: the scheduler acquires it when admission starts and
/// releases it at the end of `Switching`, which spans several state-machine
/// steps.  With a single scheduler it never blocks.
pub struct CrossingPermit {
    held:    Mutex<bool>,
    condvar: Condvar,
}

impl CrossingPermit {
    pub fn new() -> Self {
        Self { held: Mutex::new(false), condvar: Condvar::new() }
    }

    /// Block until the permit is free, then take it.
    pub fn acquire(&self) {
        let mut held = self.held.lock();
        while *held {
            self.condvar.wait(&mut held);
        }
        *held = true;
    }

    /// Return the permit.  Releasing a free permit is a no-op.
    pub fn release(&self) {
        let mut held = self.held.lock();
        *held = false;
        self.condvar.notify_one();
    }

    pub fn is_held(&self) -> bool {
        *self.held.lock()
    }
}

impl Default for CrossingPermit {
    fn default() -> Self {
        Self::new()
    }
}
