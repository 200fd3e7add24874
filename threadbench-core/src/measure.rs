//! Trial Timing
//!
//! Trials are timed with a monotonic wall clock. The [`Clock`] seam lets the
//! executor be driven by a scripted clock in tests.

use std::time::{Duration, Instant};

/// Measures how long a trial takes
pub trait Clock {
    /// Run `f` and return its result together with the elapsed wall-clock time
    fn time<R>(&self, f: impl FnOnce() -> R) -> (R, Duration);
}

/// Monotonic wall clock backed by [`std::time::Instant`]
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
    #[inline]
    fn time<R>(&self, f: impl FnOnce() -> R) -> (R, Duration) {
        let start = Instant::now();
        let result = f();
        (result, start.elapsed())
    }
}

/// Elapsed time as fractional seconds (nanosecond resolution)
#[inline]
pub fn as_seconds(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64()
}

/// Iterations per second for one trial.
///
/// A zero-length trial yields `f64::INFINITY` rather than NaN so that a
/// degenerate measurement stays visible in the report.
pub fn throughput(iterations: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        iterations as f64 / elapsed_secs
    } else if iterations == 0 {
        0.0
    } else {
        f64::INFINITY
    }
}
