//! Workload Contract
//!
//! A [`Workload`] is a unit of benchmarkable behavior driven against a shared
//! [`Target`]. The harness only ever talks to a workload through a
//! [`WorkloadAdapter`], which checks the target for errors after every call
//! and caches the display name.

use crate::error::{HarnessError, Phase};
use std::sync::OnceLock;

/// Harness-facing view of the benchmark target.
///
/// Workloads drive the target through its own API (one unit of work per
/// `run`, state restoration in `reset`); the harness only needs to ask it for
/// errors, iteration counts and the preferred output mode.
pub trait Target: Sync {
    /// Last error recorded by the target.
    ///
    /// `thread` is the worker index after a `run`, or `None` after a `reset`.
    /// Returning `Some` fails the current operation.
    fn last_error(&self, thread: Option<usize>) -> Option<String>;

    /// Number of iterations a trial completes (used as the throughput numerator)
    fn iterations(&self) -> u64;

    /// Whether results should be streamed as plain `Threads: N ops/sec: X` lines
    fn raw_output(&self) -> bool {
        false
    }
}

/// A benchmarkable unit of behavior
pub trait Workload<T: ?Sized>: Send + Sync {
    /// Execute one unit of work as worker `thread` of `threads`
    fn run(&self, thread: usize, threads: usize, target: &T) -> anyhow::Result<()>;

    /// Restore the target to a known state before a trial
    fn reset(&self, target: &T) -> anyhow::Result<()>;

    /// Read-only workloads leave the target unchanged, so `reset` only runs
    /// once before the first trial of the sweep
    fn read_only(&self) -> bool;

    /// Display name. Defaults to the implementing type's name without module paths.
    fn name(&self) -> String {
        readable_type_name(std::any::type_name::<Self>())
    }
}

/// Strip module paths from a type name, keeping generic arguments.
///
/// `app::tests::Insert<app::Doc>` becomes `Insert<Doc>`. Falls back to the raw
/// name if stripping leaves nothing printable.
pub fn readable_type_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut segment = String::new();

    for c in raw.chars() {
        match c {
            ':' => segment.clear(),
            '<' | '>' | ',' | ' ' | '&' | '(' | ')' | '[' | ']' | ';' => {
                out.push_str(&segment);
                segment.clear();
                out.push(c);
            }
            _ => segment.push(c),
        }
    }
    out.push_str(&segment);

    if out.trim().is_empty() {
        raw.to_string()
    } else {
        out
    }
}

/// Uniform wrapper the harness uses to drive a workload.
///
/// After every `run` and `reset` the target is asked for its last error, so
/// failures abort the trial instead of being absorbed.
pub struct WorkloadAdapter<T: ?Sized> {
    workload: Box<dyn Workload<T>>,
    name: OnceLock<String>,
}

impl<T: Target + ?Sized> WorkloadAdapter<T> {
    /// Wrap a workload
    pub fn new(workload: impl Workload<T> + 'static) -> Self {
        Self::from_boxed(Box::new(workload))
    }

    /// Wrap an already boxed workload
    pub fn from_boxed(workload: Box<dyn Workload<T>>) -> Self {
        Self {
            workload,
            name: OnceLock::new(),
        }
    }

    /// Run one unit of work, then check the target for a per-thread error
    pub fn run(&self, thread: usize, threads: usize, target: &T) -> Result<(), HarnessError> {
        self.workload
            .run(thread, threads, target)
            .map_err(|e| HarnessError::Worker {
                phase: Phase::Run,
                thread,
                threads,
                message: format!("{e:#}"),
            })?;

        match target.last_error(Some(thread)) {
            Some(message) => Err(HarnessError::Target {
                phase: Phase::Run,
                thread: Some(thread),
                message,
            }),
            None => Ok(()),
        }
    }

    /// Reset the target, then check it for a global error
    pub fn reset(&self, target: &T) -> Result<(), HarnessError> {
        self.workload
            .reset(target)
            .map_err(|e| HarnessError::Worker {
                phase: Phase::Reset,
                thread: 0,
                threads: 1,
                message: format!("{e:#}"),
            })?;

        match target.last_error(None) {
            Some(message) => Err(HarnessError::Target {
                phase: Phase::Reset,
                thread: None,
                message,
            }),
            None => Ok(()),
        }
    }

    /// Whether the wrapped workload is read-only
    pub fn read_only(&self) -> bool {
        self.workload.read_only()
    }

    /// Display name, resolved on first use
    pub fn name(&self) -> &str {
        self.name.get_or_init(|| self.workload.name())
    }
}

impl<T: ?Sized> std::fmt::Debug for WorkloadAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkloadAdapter")
            .field("name", &self.name.get())
            .finish_non_exhaustive()
    }
}
