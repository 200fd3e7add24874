#![warn(missing_docs)]
//! ThreadBench Report - Result Documents and Output Formats
//!
//! Generates various output formats:
//! - JSON (machine-readable, one document per run or one line per workload)
//! - CSV (spreadsheet-compatible)
//! - Raw (`Threads: N ops/sec: X` lines for quick comparisons)

mod csv;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use json::{generate_json_report, generate_workload_json};
pub use report::{
    FailureInfo, Report, ReportConfig, ReportMeta, ReportSummary, SystemInfo, ThreadLevelSummary,
    WorkloadReport,
};

/// Version of the report document layout
pub const SCHEMA_VERSION: u32 = 1;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON document
    Json,
    /// CSV rows
    Csv,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Line printed for one level in raw output mode
pub fn format_raw_line(threads: usize, ops_per_sec: f64) -> String {
    format!("Threads: {} ops/sec: {}", threads, ops_per_sec)
}
