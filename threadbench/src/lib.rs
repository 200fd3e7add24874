#![warn(missing_docs)]
//! # ThreadBench
//!
//! Multithreaded micro-benchmark harness for Rust.
//!
//! ThreadBench runs a suite of workloads against a shared target while
//! sweeping the number of concurrent worker threads, and reports how
//! throughput scales:
//! - **Thread Sweeps**: every workload runs at each configured level (1, 2, 4, 8 by default)
//! - **Repeated Trials**: 30 timed trials per level with fresh, fully joined worker threads
//! - **Reset Policy**: mutating workloads reset the target before every trial, read-only ones once
//! - **Scaling Statistics**: mean, population variance, standard deviation, RSD and
//!   speedup against the single-thread baseline
//! - **Fail-Fast Targets**: target errors abort only the affected workload
//! - **Reports**: JSON documents keyed by thread count, CSV, human-readable tables
//!   and raw `Threads: N ops/sec: X` lines
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use threadbench::prelude::*;
//!
//! #[derive(Default)]
//! struct Counter(AtomicU64);
//!
//! impl Target for Counter {
//!     fn last_error(&self, _thread: Option<usize>) -> Option<String> {
//!         None
//!     }
//!
//!     fn iterations(&self) -> u64 {
//!         self.0.load(Ordering::Relaxed)
//!     }
//! }
//!
//! struct Increment;
//!
//! impl Workload<Counter> for Increment {
//!     fn run(&self, _thread: usize, _threads: usize, target: &Counter) -> anyhow::Result<()> {
//!         for _ in 0..10_000 {
//!             target.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!         Ok(())
//!     }
//!
//!     fn reset(&self, target: &Counter) -> anyhow::Result<()> {
//!         target.0.store(0, Ordering::Relaxed);
//!         Ok(())
//!     }
//!
//!     fn read_only(&self) -> bool {
//!         false
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     threadbench::run(Suite::new(Counter::default()).with(Increment))
//! }
//! ```

// Re-export core types
pub use threadbench_core::{
    Clock, DEFAULT_THREAD_LEVELS, DEFAULT_TRIALS, HarnessError, Phase, Suite, Target, WallClock,
    Workload, WorkloadAdapter, launch, readable_type_name,
};

// Re-export stats
pub use threadbench_stats::{BASELINE_THREADS, LevelStatistics, ScalingError, summarize};

// Re-export report types
pub use threadbench_report::{
    OutputFormat, Report, ThreadLevelSummary, WorkloadReport, generate_csv_report,
    generate_json_report, generate_workload_json,
};

// Re-export the harness
pub use threadbench_cli::{BenchConfig, ExecutionConfig, Executor, WorkloadFailure, build_report};

pub use anyhow;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Suite, Target, Workload};
}

/// Run the ThreadBench CLI harness against a suite.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     threadbench::run(Suite::new(MyTarget::default()).with(MyWorkload))
/// }
/// ```
pub use threadbench_cli::run;
