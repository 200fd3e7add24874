//! Report Data Structures
//!
//! Per-level field names (`time`, `ops_per_sec`, `standardDeviation`, `RSD`, ...)
//! and the thread-count-keyed `results` object are the established document
//! shape; downstream tooling parses them by name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use threadbench_stats::LevelStatistics;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub workloads: Vec<WorkloadReport>,
    pub failures: Vec<FailureInfo>,
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Sweep configuration captured in report metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Thread-count levels in sweep order
    pub threads: Vec<usize>,
    /// Trials per level
    pub trials: usize,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

/// Results for one workload across every thread-count level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadReport {
    /// Workload display name
    pub name: String,
    /// One entry per level, in sweep order, serialized as `{"<threads>": {...}}`
    #[serde(with = "by_thread_count")]
    pub results: Vec<ThreadLevelSummary>,
}

impl WorkloadReport {
    /// Start an empty report for `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
        }
    }

    /// Summary for a given thread count
    pub fn level(&self, threads: usize) -> Option<&ThreadLevelSummary> {
        self.results.iter().find(|l| l.threads == threads)
    }
}

/// Statistics for one (workload, thread-count) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadLevelSummary {
    /// Thread count (the key in the serialized `results` object)
    #[serde(skip)]
    pub threads: usize,
    /// Mean trial duration in seconds
    #[serde(rename = "time")]
    pub elapsed_secs: f64,
    /// Iterations per second derived from the mean trial duration
    pub ops_per_sec: f64,
    /// Baseline duration / this level's duration; `null` without a baseline
    pub speedup: Option<f64>,
    /// Per-trial throughput samples
    #[serde(rename = "ops_per_sec_samples")]
    pub samples: Vec<f64>,
    /// Population variance of the samples
    pub variance: f64,
    /// Standard deviation of the samples
    #[serde(rename = "standardDeviation")]
    pub std_dev: f64,
    /// Standard deviation relative to `ops_per_sec`
    #[serde(rename = "RSD")]
    pub rsd: f64,
}

impl ThreadLevelSummary {
    /// Build from the statistics computed for `threads`
    pub fn from_stats(threads: usize, stats: &LevelStatistics) -> Self {
        Self {
            threads,
            elapsed_secs: stats.mean_elapsed_secs,
            ops_per_sec: stats.ops_per_sec,
            speedup: stats.speedup,
            samples: stats.samples.clone(),
            variance: stats.variance,
            std_dev: stats.std_dev,
            rsd: stats.rsd,
        }
    }
}

/// A workload whose sweep was aborted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureInfo {
    /// Workload display name
    pub workload: String,
    /// Failure category: `target`, `worker`, `precondition` or `spawn`
    pub kind: String,
    /// Thread-count level being measured when the failure occurred
    pub threads: Option<usize>,
    pub message: String,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_workloads: usize,
    pub completed: usize,
    pub failed: usize,
    pub total_duration_ms: f64,
}

/// Serializes levels as an object keyed by thread count, preserving sweep order
mod by_thread_count {
    use super::ThreadLevelSummary;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(
        levels: &[ThreadLevelSummary],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(levels.len()))?;
        for level in levels {
            map.serialize_entry(&level.threads.to_string(), level)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<ThreadLevelSummary>, D::Error> {
        struct LevelsVisitor;

        impl<'de> Visitor<'de> for LevelsVisitor {
            type Value = Vec<ThreadLevelSummary>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by thread count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut levels = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, mut level)) =
                    access.next_entry::<String, ThreadLevelSummary>()?
                {
                    level.threads = key.parse().map_err(|_| {
                        serde::de::Error::custom(format!("invalid thread count key: {key}"))
                    })?;
                    levels.push(level);
                }
                Ok(levels)
            }
        }

        deserializer.deserialize_map(LevelsVisitor)
    }
}
