//! Report Building
//!
//! Constructs the complete report from per-workload sweep outcomes.
//!
//! ## Pipeline
//!
//! ```text
//!   Vec<WorkloadOutcome>
//!          │
//!          ▼
//!   ┌─────────────────────┐
//!   │  split by outcome   │  WorkloadReport / FailureInfo
//!   └──────────┬──────────┘
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │      Report         │  Ready for JSON/CSV/human output
//!   └─────────────────────┘
//! ```

use super::execution::{ExecutionConfig, WorkloadOutcome, failure_kind};
use super::metadata::build_report_meta;
use threadbench_report::{FailureInfo, Report, ReportSummary};

/// Build a complete Report from sweep outcomes
///
/// Workloads keep the order in which they ran; failures are listed separately
/// with the level they were measuring when they stopped.
pub fn build_report(
    outcomes: Vec<WorkloadOutcome>,
    config: &ExecutionConfig,
    total_duration_ms: f64,
) -> Report {
    let mut summary = ReportSummary {
        total_workloads: outcomes.len(),
        total_duration_ms,
        ..Default::default()
    };

    let mut workloads = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(report) => {
                summary.completed += 1;
                workloads.push(report);
            }
            Err(failure) => {
                summary.failed += 1;
                failures.push(FailureInfo {
                    kind: failure_kind(&failure.error).to_string(),
                    message: failure.error.to_string(),
                    workload: failure.name,
                    threads: failure.threads,
                });
            }
        }
    }

    Report {
        meta: build_report_meta(config),
        workloads,
        failures,
        summary,
    }
}
