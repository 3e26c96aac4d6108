//! Monotonic clock abstraction for the simulation.
//!
//! All decay and refill arithmetic is driven by elapsed wall-clock time, and
//! the observability pacing between ticks is a real sleep. Putting both
//! behind the [`Clock`] trait lets the test suite run the full simulation on
//! an accelerated virtual clock instead of waiting out the pacing delays.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of monotonic time points and pacing delays.
///
/// Implementations must be shareable across worker threads.
pub trait Clock: Send + Sync {
    /// Sample the current monotonic instant.
    fn now(&self) -> Instant;

    /// Pause the calling worker for `duration`, as seen by this clock.
    fn sleep(&self, duration: Duration);
}

/// Real wall-clock time, used by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock whose time only moves when a caller sleeps or explicitly
/// advances it.
///
/// `sleep` advances the shared virtual offset instead of blocking, so a
/// simulation that would pace itself over minutes of wall time completes in
/// milliseconds while keeping the same elapsed-time arithmetic.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset_nanos: AtomicU64,
}

impl ManualClock {
    /// Create a virtual clock starting at the current instant.
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_nanos: AtomicU64::new(0),
        }
    }

    /// Move virtual time forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        self.offset_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Virtual time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
