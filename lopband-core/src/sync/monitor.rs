//! Level-triggered, single-wake signaling primitive.
//!
//! A `Monitor` is deliberately *not* a full condition variable: `signal`
//! wakes at most one parked waiter, and the flag stays set until `reset`.
//! With N threads parked before a single `signal`, exactly one of them
//! proceeds; the rest stay parked until further signals arrive. Correct
//! usage therefore always pairs a `Monitor` with an external, lock-protected
//! condition that is rechecked in a loop (see [`WorkQueue`]) and never
//! treats the sticky flag alone as the source of truth.
//!
//! [`WorkQueue`]: crate::sync::WorkQueue

use parking_lot::{Condvar, Mutex};

/// Sticky boolean condition with single-wake semantics.
pub struct Monitor {
    signaled: Mutex<bool>,
    condition: Condvar,
}

impl Monitor {
    /// Creates a monitor in the non-signaled state.
    pub fn new() -> Self {
        Self {
            signaled: Mutex::new(false),
            condition: Condvar::new(),
        }
    }

    /// Sets the flag and wakes at most one thread parked in [`wait`].
    ///
    /// Safe to call with no waiters; the flag simply stays set, and the
    /// next `wait` returns immediately.
    ///
    /// [`wait`]: Monitor::wait
    pub fn signal(&self) {
        let mut signaled = self.signaled.lock();
        *signaled = true;
        self.condition.notify_one();
    }

    /// Blocks the calling thread until the flag is observed set.
    ///
    /// Does not clear the flag. Spurious wakeups are absorbed by the
    /// recheck loop.
    pub fn wait(&self) {
        let mut signaled = self.signaled.lock();
        while !*signaled {
            self.condition.wait(&mut signaled);
        }
    }

    /// Clears the flag. Threads already woken are unaffected.
    pub fn reset(&self) {
        *self.signaled.lock() = false;
    }

    /// Returns the current level without blocking.
    pub fn is_signaled(&self) -> bool {
        *self.signaled.lock()
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}
