#![warn(missing_docs)]
//! ThreadBench Core - Workload Runtime
//!
//! This crate provides the execution primitives for thread-scaling benchmarks:
//! - `Workload` trait and the `WorkloadAdapter` that error-checks every call
//! - `launch`: spawn N workers for one trial and join them all
//! - `Suite`: a target plus its registered workloads
//! - `Clock` seam for trial timing (`WallClock` in production)

mod error;
mod launcher;
mod measure;
mod suite;
mod workload;

pub use error::{HarnessError, Phase};
pub use launcher::launch;
pub use measure::{Clock, WallClock, as_seconds, throughput};
pub use suite::Suite;
pub use workload::{Target, Workload, WorkloadAdapter, readable_type_name};

/// Trials per thread-count level when none is configured
pub const DEFAULT_TRIALS: usize = 30;

/// Thread-count levels swept when none are configured
pub const DEFAULT_THREAD_LEVELS: &[usize] = &[1, 2, 4, 8];
