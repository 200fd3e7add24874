//! Output Formatting
//!
//! Human-readable output formatting for sweep reports: one table per workload
//! with a row per thread-count level, followed by failures and a summary.

use threadbench_report::{Report, WorkloadReport};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("ThreadBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");
    output.push_str(&format!(
        "  {} ({} cores), {} trials per level\n\n",
        report.meta.system.cpu, report.meta.system.cpu_cores, report.meta.config.trials
    ));

    for workload in &report.workloads {
        format_workload(&mut output, workload);
    }

    if !report.failures.is_empty() {
        output.push_str("Failures\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for failure in &report.failures {
            let level = failure
                .threads
                .map(|t| format!(" at {t} threads"))
                .unwrap_or_default();
            output.push_str(&format!(
                "  ✗ {} [{}]{}: {}\n",
                failure.workload, failure.kind, level, failure.message
            ));
        }
        output.push('\n');
    }

    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Total: {}  Completed: {}  Failed: {}\n",
        report.summary.total_workloads, report.summary.completed, report.summary.failed
    ));
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));

    output
}

fn format_workload(output: &mut String, workload: &WorkloadReport) {
    output.push_str(&format!("{}\n", workload.name));
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  {:>7}  {:>14}  {:>8}  {:>12}  {:>8}\n",
        "Threads", "ops/sec", "Speedup", "Std Dev", "RSD"
    ));

    for level in &workload.results {
        let speedup = level
            .speedup
            .map(|s| format!("{s:.2}x"))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "  {:>7}  {:>14.2}  {:>8}  {:>12.2}  {:>7.2}%\n",
            level.threads,
            level.ops_per_sec,
            speedup,
            level.std_dev,
            level.rsd * 100.0
        ));
    }
    output.push('\n');
}
