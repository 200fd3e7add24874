//! Per-Level Statistics
//!
//! Collects the trials of one thread-count level and turns them into a
//! [`ThreadLevelSummary`]. Only the orchestrating thread touches these
//! counters, after every worker of a trial has been joined.

use threadbench_core::HarnessError;
use threadbench_report::ThreadLevelSummary;
use threadbench_stats::summarize;

/// Trials recorded so far for one thread-count level
#[derive(Debug, Clone, Default)]
pub struct LevelTrials {
    samples: Vec<f64>,
    total_elapsed_secs: f64,
}

impl LevelTrials {
    /// Empty accumulator sized for `trials`
    pub fn with_capacity(trials: usize) -> Self {
        Self {
            samples: Vec::with_capacity(trials),
            total_elapsed_secs: 0.0,
        }
    }

    /// Record one trial's duration and throughput sample
    pub fn record(&mut self, elapsed_secs: f64, sample: f64) {
        self.samples.push(sample);
        self.total_elapsed_secs += elapsed_secs;
    }

    /// Number of trials recorded
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no trials were recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean trial duration in seconds (0 when empty)
    pub fn mean_elapsed_secs(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.total_elapsed_secs / self.samples.len() as f64
        }
    }

    /// Summarize the level against an optional single-thread baseline
    pub fn summarize(
        &self,
        threads: usize,
        baseline_elapsed_secs: Option<f64>,
        iterations: u64,
    ) -> Result<ThreadLevelSummary, HarnessError> {
        let stats = summarize(
            &self.samples,
            self.mean_elapsed_secs(),
            baseline_elapsed_secs,
            iterations as f64,
        )
        .map_err(|e| HarnessError::Precondition(format!("level {threads}: {e}")))?;

        Ok(ThreadLevelSummary::from_stats(threads, &stats))
    }
}
