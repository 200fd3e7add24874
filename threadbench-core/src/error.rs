//! Harness Errors
//!
//! Every failure is terminal for the workload sweep that raised it. The
//! harness never retries; callers decide whether to continue with the
//! remaining workloads.

use std::fmt;
use thiserror::Error;

/// Which workload operation was in progress when a failure surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `Workload::reset`
    Reset,
    /// `Workload::run`
    Run,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Reset => f.write_str("reset"),
            Phase::Run => f.write_str("run"),
        }
    }
}

/// Errors raised while benchmarking a workload
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The target reported an error after a run or reset call
    #[error("target error after {phase}{}: {message}", thread_suffix(.thread))]
    Target {
        /// Operation that preceded the error
        phase: Phase,
        /// Worker index, `None` for reset
        thread: Option<usize>,
        /// Message reported by the target
        message: String,
    },

    /// A worker execution returned an error or panicked
    #[error("worker {thread} of {threads} failed during {phase}: {message}")]
    Worker {
        /// Operation that failed
        phase: Phase,
        /// Worker index
        thread: usize,
        /// Size of the worker group
        threads: usize,
        /// Error or panic message
        message: String,
    },

    /// Programming error in the harness configuration (zero threads, zero trials, ...)
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// The OS refused to create a worker thread
    #[error("failed to spawn worker {thread}: {source}")]
    Spawn {
        /// Worker index that could not be spawned
        thread: usize,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    /// Whether the failure came from the target or a workload, as opposed to
    /// a misconfigured harness
    pub fn is_execution_failure(&self) -> bool {
        matches!(
            self,
            HarnessError::Target { .. } | HarnessError::Worker { .. }
        )
    }
}

fn thread_suffix(thread: &Option<usize>) -> String {
    thread.map(|t| format!(" on worker {t}")).unwrap_or_default()
}

/// Extract a printable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_error_display() {
        let err = HarnessError::Target {
            phase: Phase::Run,
            thread: Some(2),
            message: "duplicate key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "target error after run on worker 2: duplicate key"
        );

        let err = HarnessError::Target {
            phase: Phase::Reset,
            thread: None,
            message: "ns not found".to_string(),
        };
        assert_eq!(err.to_string(), "target error after reset: ns not found");
    }

    #[test]
    fn test_execution_failure_classification() {
        let worker = HarnessError::Worker {
            phase: Phase::Run,
            thread: 0,
            threads: 1,
            message: "boom".to_string(),
        };
        assert!(worker.is_execution_failure());
        assert!(!HarnessError::Precondition("zero threads".to_string()).is_execution_failure());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(payload.as_ref()), "Unknown panic");
    }
}
