//! Cooperative cancellation for search runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Inner {
    done: AtomicBool,
    lock: Mutex<()>,
    wake: Condvar,
}

/// A cloneable cancellation token.
///
/// All clones share one flag. Cancelling is idempotent and may happen from
/// any thread, before, during or after the run it belongs to. A run
/// suspended in [`sleep`](CancelToken::sleep) wakes up immediately.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.done.load(Ordering::Acquire)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.inner.done.store(true, Ordering::Release);
        // Taking the lock orders the store against a sleeper that has
        // checked the flag but not yet started waiting.
        let _guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.inner.wake.notify_all();
    }

    /// Block for `delay` or until cancelled, whichever comes first.
    ///
    /// Returns `true` if the token was cancelled before or during the wait.
    /// A delay too long to represent as an [`Instant`] waits for
    /// cancellation alone.
    pub fn sleep(&self, delay: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        let deadline = Instant::now().checked_add(delay);
        let mut guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        loop {
            if self.is_cancelled() {
                return true;
            }
            let Some(deadline) = deadline else {
                guard = self
                    .inner
                    .wake
                    .wait(guard)
                    .unwrap_or_else(PoisonError::into_inner);
                continue;
            };
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            guard = self
                .inner
                .wake
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}
