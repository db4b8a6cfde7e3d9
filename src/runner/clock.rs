//! Time sources for the benchmark harness.
//!
//! The harness reads time through [`Clock`] so tests can drive it with a deterministic clock. Readings are
//! offsets from an arbitrary origin; only differences are meaningful.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock: Send + Sync {
    /// Time since the clock's origin. Never decreases.
    fn now(&self) -> Duration;

    /// Time since an earlier reading, never negative.
    fn since(&self, earlier: Duration) -> Duration {
        self.now().saturating_sub(earlier)
    }
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that advances by a fixed step on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    step_nanos: u64,
    ticks: AtomicU64,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step_nanos: u64::try_from(step.as_nanos()).unwrap_or(u64::MAX),
            ticks: AtomicU64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Duration {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
        Duration::from_nanos(tick.saturating_mul(self.step_nanos))
    }
}

/// Round `elapsed` down to a multiple of `resolution`.
///
/// A zero resolution leaves the value unchanged.
pub fn quantize(elapsed: Duration, resolution: Duration) -> Duration {
    let res = resolution.as_nanos();
    if res <= 1 {
        return elapsed;
    }
    let nanos = elapsed.as_nanos() / res * res;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
