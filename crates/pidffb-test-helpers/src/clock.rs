//! Hand-driven millisecond clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use pidffb_core::Clock;

/// Clock whose time only moves when a test says so.
///
/// Clones share the same time, so one handle can be given to the pool and
/// engine while the test keeps another to advance it.
///
/// # Example
///
/// ```rust
/// use pidffb_core::Clock;
/// use pidffb_test_helpers::ManualClock;
///
/// let clock = ManualClock::new();
/// let shared = clock.clone();
/// clock.advance(5);
/// assert_eq!(shared.now_ms(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u64) -> Self {
        let clock = Self::new();
        clock.set(ms);
        clock
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
