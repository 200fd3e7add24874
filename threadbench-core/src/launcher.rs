//! Thread Launcher
//!
//! Runs one trial's worth of workload executions: `threads` fresh OS threads,
//! each calling `run` with its own index, all joined before returning.
//! There is no pool; every trial starts from a clean set of threads.

use crate::error::{HarnessError, Phase, panic_message};
use crate::workload::{Target, WorkloadAdapter};
use std::thread;

/// Spawn `threads` concurrent executions of `workload` and join them all.
///
/// Worker `i` receives `(i, threads)`. A failure in one worker does not cut
/// the others short: every spawned thread is joined first, then the failure
/// of the lowest-indexed failing worker is returned.
///
/// # Errors
/// - [`HarnessError::Precondition`] if `threads == 0` (nothing is spawned)
/// - [`HarnessError::Spawn`] if the OS refuses a thread
/// - any error raised by a worker's `run`, or [`HarnessError::Worker`] for a panic
pub fn launch<T: Target + ?Sized>(
    threads: usize,
    workload: &WorkloadAdapter<T>,
    target: &T,
) -> Result<(), HarnessError> {
    if threads == 0 {
        return Err(HarnessError::Precondition(
            "thread count must be greater than zero".to_string(),
        ));
    }

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(threads);
        let mut spawn_error = None;

        for i in 0..threads {
            let spawned = thread::Builder::new()
                .name(format!("threadbench-worker-{i}"))
                .spawn_scoped(s, move || workload.run(i, threads, target));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    spawn_error = Some(HarnessError::Spawn { thread: i, source });
                    break;
                }
            }
        }

        // Join everything before looking at results
        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join()).collect();

        let mut first_error = None;
        for (i, outcome) in outcomes.into_iter().enumerate() {
            let err = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(payload) => HarnessError::Worker {
                    phase: Phase::Run,
                    thread: i,
                    threads,
                    message: panic_message(payload.as_ref()),
                },
            };
            tracing::debug!(worker = i, threads, error = %err, "worker failed");
            if first_error.is_none() {
                first_error = Some(err);
            }
        }

        match first_error.or(spawn_error) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    })
}
