#![warn(missing_docs)]
//! ThreadBench Statistical Engine
//!
//! Turns per-trial throughput samples into the numbers a scaling report needs:
//! - Population mean, variance and standard deviation of the samples
//! - Headline throughput from the mean trial duration
//! - Relative standard deviation against that throughput
//! - Speedup relative to the single-thread baseline

mod scaling;
mod summary;

pub use scaling::{LevelStatistics, ScalingError, summarize};
pub use summary::{SampleStatistics, compute_summary, population_variance};

/// Thread-count level whose mean elapsed time is the speedup baseline
pub const BASELINE_THREADS: usize = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(BASELINE_THREADS, 1);
    }
}
