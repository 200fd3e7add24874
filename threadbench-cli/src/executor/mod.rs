//! Sweep Executor
//!
//! Runs workloads through the thread-count sweep and turns the outcomes into a
//! report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Suite (target + registered workloads)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Reset, launch N workers, time each trial
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ statistics  │  Per-level mean, variance, RSD, speedup
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Build Report with metadata and failures
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Sweep orchestration and live output
//! - [`statistics`] - Per-level trial accumulation
//! - [`report`] - Report building
//! - [`formatting`] - Human-readable output formatting
//! - [`metadata`] - System metadata collection

mod execution;
mod formatting;
mod metadata;
mod report;
mod statistics;

// Re-export public API
pub use execution::{
    ExecutionConfig, Executor, WorkloadFailure, WorkloadOutcome, failure_kind,
};
pub use formatting::format_human_output;
pub use metadata::build_report_meta;
pub use report::build_report;
pub use statistics::LevelTrials;
