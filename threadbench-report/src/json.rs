//! JSON Output

use crate::report::{Report, WorkloadReport};

/// Generate a prettified JSON report.
///
/// Serializes the complete benchmark report into machine-readable JSON format.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Single-line JSON document for one workload, suitable for streaming as
/// each workload finishes.
pub fn generate_workload_json(workload: &WorkloadReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(workload)
}
