//! Thread Scaling Statistics
//!
//! Summarizes one thread-count level: throughput samples from every trial,
//! the mean trial duration, and speedup against the single-thread baseline.
//!
//! Two conventions are load-bearing for consumers of existing reports:
//! - headline throughput is `iterations / mean_elapsed`, not the sample mean
//! - relative standard deviation divides by that headline throughput

use crate::summary::compute_summary;
use thiserror::Error;

/// Errors from [`summarize`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScalingError {
    /// No trial samples were supplied
    #[error("cannot summarize a level with no samples")]
    NoSamples,
    /// Mean elapsed time is negative or not a number
    #[error("invalid mean elapsed time: {0}")]
    InvalidElapsed(f64),
}

/// Aggregated statistics for one (workload, thread-count) pair
#[derive(Debug, Clone, PartialEq)]
pub struct LevelStatistics {
    /// Mean trial duration in seconds
    pub mean_elapsed_secs: f64,
    /// `iterations / mean_elapsed_secs`
    pub ops_per_sec: f64,
    /// Mean of the per-trial throughput samples
    pub mean: f64,
    /// Population variance of the samples
    pub variance: f64,
    /// Square root of `variance`
    pub std_dev: f64,
    /// `std_dev / ops_per_sec`
    pub rsd: f64,
    /// `baseline / mean_elapsed_secs`; `None` until a baseline exists
    pub speedup: Option<f64>,
    /// Per-trial throughput samples in trial order
    pub samples: Vec<f64>,
}

/// Summarize one level's trials.
///
/// # Arguments
/// * `samples` - per-trial throughput (iterations / elapsed seconds)
/// * `mean_elapsed_secs` - mean trial duration at this level
/// * `baseline_elapsed_secs` - mean trial duration at one thread, if measured yet
/// * `iterations` - iterations completed per trial
///
/// For the single-thread level pass its own mean as the baseline; the
/// resulting speedup is exactly `1.0`.
pub fn summarize(
    samples: &[f64],
    mean_elapsed_secs: f64,
    baseline_elapsed_secs: Option<f64>,
    iterations: f64,
) -> Result<LevelStatistics, ScalingError> {
    if samples.is_empty() {
        return Err(ScalingError::NoSamples);
    }
    if mean_elapsed_secs.is_nan() || mean_elapsed_secs < 0.0 {
        return Err(ScalingError::InvalidElapsed(mean_elapsed_secs));
    }

    let summary = compute_summary(samples);

    let ops_per_sec = if mean_elapsed_secs > 0.0 {
        iterations / mean_elapsed_secs
    } else {
        f64::INFINITY
    };

    let rsd = if ops_per_sec > 0.0 {
        summary.std_dev / ops_per_sec
    } else {
        0.0
    };

    let speedup = baseline_elapsed_secs
        .filter(|_| mean_elapsed_secs > 0.0)
        .map(|baseline| baseline / mean_elapsed_secs);

    Ok(LevelStatistics {
        mean_elapsed_secs,
        ops_per_sec,
        mean: summary.mean,
        variance: summary.variance,
        std_dev: summary.std_dev,
        rsd,
        speedup,
        samples: samples.to_vec(),
    })
}
