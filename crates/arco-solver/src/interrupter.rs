//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag a caller raises to ask a running backend to stop early.
///
/// The session hands it to the backend untouched. Once raised it stays
/// raised; create a new interrupter for the next solve.
#[derive(Debug, Default)]
pub struct SolveInterrupter {
    interrupted: AtomicBool,
}

impl SolveInterrupter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::Release);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Acquire)
    }
}
