//! Summary Statistics
//!
//! Trial samples are treated as the whole population: every trial that was
//! run is in the sample set, so variance divides by `n`, not `n - 1`.

/// Descriptive statistics over one level's throughput samples
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    /// Square root of the population variance
    pub std_dev: f64,
    /// Number of samples
    pub sample_count: usize,
}

/// Compute population statistics. Empty input yields all zeros.
pub fn compute_summary(samples: &[f64]) -> SampleStatistics {
    if samples.is_empty() {
        return SampleStatistics {
            mean: 0.0,
            variance: 0.0,
            std_dev: 0.0,
            sample_count: 0,
        };
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = population_variance(samples, mean);

    SampleStatistics {
        mean,
        variance,
        std_dev: variance.sqrt(),
        sample_count: samples.len(),
    }
}

/// `Σ(x - mean)² / n`
pub fn population_variance(samples: &[f64], mean: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|x| (mean - x) * (mean - x)).sum::<f64>() / samples.len() as f64
}
