//! Rejection of overlapping calls on one session.

use arco_core::ArcoError;
use std::sync::{Mutex, MutexGuard};

/// Records whether a session call is in progress.
#[derive(Debug, Default)]
pub struct CallsTracker {
    in_call: Mutex<bool>,
}

impl CallsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_call(&self) -> bool {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        match self.in_call.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Scoped token proving exclusive use of a [`CallsTracker`].
///
/// Acquisition never blocks: a second caller fails immediately. The tracker
/// is released when the token is dropped, including on early returns and
/// unwinding.
#[derive(Debug)]
pub struct ConcurrentCallsGuard<'a> {
    tracker: &'a CallsTracker,
}

impl<'a> ConcurrentCallsGuard<'a> {
    pub fn try_acquire(tracker: &'a CallsTracker) -> Result<Self, ArcoError> {
        let mut in_call = tracker.lock();
        if *in_call {
            tracing::warn!(
                component = "solver",
                operation = "acquire_guard",
                status = "error",
                "Rejected concurrent call on a solver session"
            );
            return Err(ArcoError::failed_precondition(
                "concurrent calls to the same Solver are not supported, the Solver is already in use",
            ));
        }
        *in_call = true;
        Ok(Self { tracker })
    }
}

impl Drop for ConcurrentCallsGuard<'_> {
    fn drop(&mut self) {
        *self.tracker.lock() = false;
    }
}
