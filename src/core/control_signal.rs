// src/core/control_signal.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between the benchmark harness and
/// whoever requests early termination (typically a Ctrl-C handler).
///
/// The harness polls it between modulus iterations; an in-flight attack is
/// never preempted, only abandoned wholesale once it returns.
#[derive(Debug, Clone, Default)]
pub struct ControlSignal {
    flag: Arc<AtomicBool>,
}

impl ControlSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination. Safe to call from any thread.
    pub fn raise(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
