//! CSV Output
//!
//! One row per (workload, thread-count) pair. Samples are omitted; speedup is
//! left empty when no baseline was available.

use crate::report::Report;
use std::fmt::Write;

const HEADER: &str = "workload,threads,time,ops_per_sec,speedup,variance,standard_deviation,rsd";

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for workload in &report.workloads {
        let name = escape(&workload.name);
        for level in &workload.results {
            let speedup = level.speedup.map(|s| s.to_string()).unwrap_or_default();
            // Writing to a String cannot fail
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{},{}",
                name,
                level.threads,
                level.elapsed_secs,
                level.ops_per_sec,
                speedup,
                level.variance,
                level.std_dev,
                level.rsd
            );
        }
    }

    out
}

/// Quote a field if it contains a delimiter, quote or newline
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
