//! Benchmark Execution
//!
//! Drives every selected workload through the thread sweep.
//!
//! ## Data Flow
//!
//! ```text
//! Suite (target + workloads)
//!        │
//!        ▼
//!   ExecutionConfig (levels, trials)
//!        │
//!        ▼
//! ┌──────────────────┐   per workload, per level, per trial:
//! │     Executor     │   reset (policy) → launch N workers → time → sample
//! └────────┬─────────┘
//!          │  after the last trial of a level
//!          ▼
//!   LevelTrials::summarize → ThreadLevelSummary
//!          │
//!          ▼
//!   WorkloadReport  (or WorkloadFailure)
//! ```
//!
//! Trials and levels run strictly one after another. A failing workload stops
//! at the failing trial; the next workload starts from scratch with its own
//! baseline.

use super::statistics::LevelTrials;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::io::Write;
use threadbench_core::{
    Clock, DEFAULT_THREAD_LEVELS, DEFAULT_TRIALS, HarnessError, Suite, Target, WallClock,
    WorkloadAdapter, as_seconds, launch, throughput,
};
use threadbench_report::{WorkloadReport, format_raw_line, generate_workload_json};
use threadbench_stats::BASELINE_THREADS;
use tracing::{debug, info, warn};

/// Configuration for a thread sweep
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Thread-count levels, processed in this order
    pub threads: Vec<usize>,
    /// Timed trials per level
    pub trials: usize,
    /// Stream `Threads: N ops/sec: X` lines to the console
    pub raw: bool,
    /// Stream each finished workload as one JSON line to the console
    pub stream_json: bool,
    /// Show a progress bar on stderr
    pub progress: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREAD_LEVELS.to_vec(),
            trials: DEFAULT_TRIALS,
            raw: false,
            stream_json: false,
            progress: true,
        }
    }
}

impl ExecutionConfig {
    /// Reject sweeps that cannot produce a meaningful report.
    ///
    /// Warns (without failing) when the baseline level is missing or not
    /// first, since levels before it report no speedup.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.threads.is_empty() {
            return Err(HarnessError::Precondition(
                "at least one thread-count level is required".to_string(),
            ));
        }
        if self.trials == 0 {
            return Err(HarnessError::Precondition(
                "trials per level must be at least 1".to_string(),
            ));
        }
        if self.threads.contains(&0) {
            return Err(HarnessError::Precondition(
                "thread-count levels must be greater than zero".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.threads.len());
        if let Some(dup) = self.threads.iter().find(|t| !seen.insert(**t)) {
            return Err(HarnessError::Precondition(format!(
                "thread-count level {dup} listed more than once"
            )));
        }

        match self.threads.iter().position(|&t| t == BASELINE_THREADS) {
            None => warn!(
                levels = ?self.threads,
                "no single-thread level; speedup will be unavailable"
            ),
            Some(0) => {}
            Some(_) => warn!(
                levels = ?self.threads,
                "single-thread level is not first; earlier levels report no speedup"
            ),
        }

        Ok(())
    }
}

/// A workload whose sweep was aborted
#[derive(Debug)]
pub struct WorkloadFailure {
    /// Workload display name
    pub name: String,
    /// Level being measured, `None` if the sweep never started
    pub threads: Option<usize>,
    /// What went wrong
    pub error: HarnessError,
}

impl std::fmt::Display for WorkloadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.threads {
            Some(threads) => write!(f, "{} ({} threads): {}", self.name, threads, self.error),
            None => write!(f, "{}: {}", self.name, self.error),
        }
    }
}

impl std::error::Error for WorkloadFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Result of one workload's sweep
pub type WorkloadOutcome = Result<WorkloadReport, WorkloadFailure>;

/// Runs workloads through the thread sweep
pub struct Executor<C = WallClock> {
    config: ExecutionConfig,
    clock: C,
    console: Box<dyn Write + Send>,
}

impl Executor<WallClock> {
    /// Executor timing trials with the wall clock and writing to stdout
    pub fn new(config: ExecutionConfig) -> Self {
        Self::with_clock(config, WallClock)
    }
}

impl<C: Clock> Executor<C> {
    /// Executor timing trials with `clock`
    pub fn with_clock(config: ExecutionConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            console: Box::new(std::io::stdout()),
        }
    }

    /// Redirect live output (raw lines, streamed JSON)
    #[must_use]
    pub fn with_console(mut self, console: impl Write + Send + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Sweep configuration
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Run every workload registered in `suite`
    pub fn execute_suite<T: Target>(
        &mut self,
        suite: &Suite<T>,
    ) -> Result<Vec<WorkloadOutcome>, HarnessError> {
        let workloads: Vec<_> = suite.workloads().iter().collect();
        self.execute(&workloads, suite.target())
    }

    /// Run `workloads` in order against `target`.
    ///
    /// Fails up front only if the configuration is invalid; otherwise every
    /// workload yields an outcome, and one workload's failure does not stop
    /// the others.
    pub fn execute<T: Target>(
        &mut self,
        workloads: &[&WorkloadAdapter<T>],
        target: &T,
    ) -> Result<Vec<WorkloadOutcome>, HarnessError> {
        self.config.validate()?;

        let trials_per_workload = (self.config.threads.len() * self.config.trials) as u64;
        let pb = self.progress_bar(workloads.len() as u64 * trials_per_workload);
        let raw = self.config.raw || target.raw_output();

        let mut outcomes = Vec::with_capacity(workloads.len());
        for (index, workload) in workloads.iter().enumerate() {
            pb.set_message(workload.name().to_string());
            let outcome = self.run_workload(workload, target, raw, &pb);

            match &outcome {
                Ok(report) => {
                    if self.config.stream_json && !raw {
                        self.stream_workload(report);
                    }
                }
                Err(failure) => warn!(workload = %failure.name, error = %failure.error, "workload failed"),
            }

            // Skipped trials of a failed workload still count as done
            pb.set_position((index as u64 + 1) * trials_per_workload);
            outcomes.push(outcome);
        }

        pb.finish_with_message("Complete");
        Ok(outcomes)
    }

    /// Sweep one workload through every configured level
    fn run_workload<T: Target>(
        &mut self,
        workload: &WorkloadAdapter<T>,
        target: &T,
        raw: bool,
        pb: &ProgressBar,
    ) -> WorkloadOutcome {
        let name = workload.name();
        info!("########## {} ##########", name);

        let read_only = workload.read_only();
        let mut reset_done = false;
        let mut baseline: Option<f64> = None;
        let mut report = WorkloadReport::new(name);

        let levels = self.config.threads.clone();
        for threads in levels {
            let failed = |error: HarnessError| WorkloadFailure {
                name: name.to_string(),
                threads: Some(threads),
                error,
            };

            let mut trials = LevelTrials::with_capacity(self.config.trials);
            for trial in 0..self.config.trials {
                if !read_only || !reset_done {
                    debug!(workload = name, threads, trial, "reset");
                    workload.reset(target).map_err(failed)?;
                    reset_done = true;
                }

                let (launched, elapsed) = self.clock.time(|| launch(threads, workload, target));
                launched.map_err(failed)?;

                let secs = as_seconds(elapsed);
                let sample = throughput(target.iterations(), secs);
                trials.record(secs, sample);
                debug!(workload = name, threads, trial, secs, ops_per_sec = sample, "trial");
                pb.inc(1);
            }

            let mean_secs = trials.mean_elapsed_secs();
            if threads == BASELINE_THREADS {
                baseline = Some(mean_secs);
            }

            let level = trials
                .summarize(threads, baseline, target.iterations())
                .map_err(failed)?;

            info!(
                workload = name,
                threads,
                ops_per_sec = level.ops_per_sec,
                speedup = ?level.speedup,
                rsd = level.rsd,
                "level complete"
            );
            if raw {
                self.write_line(&format_raw_line(threads, level.ops_per_sec));
            }

            report.results.push(level);
        }

        Ok(report)
    }

    fn stream_workload(&mut self, report: &WorkloadReport) {
        match generate_workload_json(report) {
            Ok(line) => self.write_line(&line),
            Err(e) => warn!(workload = %report.name, error = %e, "failed to serialize workload"),
        }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.console, "{line}").and_then(|()| self.console.flush()) {
            warn!(error = %e, "failed to write to console");
        }
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} trials {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

/// Classify a harness error for reports
pub fn failure_kind(error: &HarnessError) -> &'static str {
    match error {
        HarnessError::Target { .. } => "target",
        HarnessError::Worker { .. } => "worker",
        HarnessError::Precondition(_) => "precondition",
        HarnessError::Spawn { .. } => "spawn",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use threadbench_core::{Phase, Workload};

    /// Clock that replays scripted trial durations, repeating the last one
    struct ScriptedClock {
        durations: Mutex<VecDeque<Duration>>,
        last: Mutex<Duration>,
    }

    impl ScriptedClock {
        fn new(durations: impl IntoIterator<Item = Duration>) -> Self {
            Self {
                durations: Mutex::new(durations.into_iter().collect()),
                last: Mutex::new(Duration::from_secs(1)),
            }
        }

        fn fixed(d: Duration) -> Self {
            Self::new([d])
        }
    }

    impl Clock for ScriptedClock {
        fn time<R>(&self, f: impl FnOnce() -> R) -> (R, Duration) {
            let result = f();
            let mut last = self.last.lock().unwrap();
            if let Some(d) = self.durations.lock().unwrap().pop_front() {
                *last = d;
            }
            (result, *last)
        }
    }

    #[derive(Default)]
    struct MockTarget {
        iterations: u64,
        fail_at_threads: Option<usize>,
        raw: bool,
        current_threads: AtomicUsize,
    }

    impl MockTarget {
        fn new(iterations: u64) -> Self {
            Self {
                iterations,
                ..Default::default()
            }
        }
    }

    impl Target for MockTarget {
        fn last_error(&self, thread: Option<usize>) -> Option<String> {
            let threads = self.current_threads.load(Ordering::SeqCst);
            (thread.is_some() && self.fail_at_threads == Some(threads))
                .then(|| format!("write conflict at {threads} threads"))
        }

        fn iterations(&self) -> u64 {
            self.iterations
        }

        fn raw_output(&self) -> bool {
            self.raw
        }
    }

    #[derive(Default)]
    struct Counters {
        runs: AtomicUsize,
        resets: AtomicUsize,
    }

    struct Counting {
        name: &'static str,
        read_only: bool,
        counters: Arc<Counters>,
    }

    impl Counting {
        fn new(name: &'static str, read_only: bool) -> (Self, Arc<Counters>) {
            let counters = Arc::new(Counters::default());
            (
                Self {
                    name,
                    read_only,
                    counters: counters.clone(),
                },
                counters,
            )
        }
    }

    impl Workload<MockTarget> for Counting {
        fn run(&self, _thread: usize, threads: usize, target: &MockTarget) -> anyhow::Result<()> {
            target.current_threads.store(threads, Ordering::SeqCst);
            self.counters.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn reset(&self, _target: &MockTarget) -> anyhow::Result<()> {
            self.counters.resets.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn read_only(&self) -> bool {
            self.read_only
        }

        fn name(&self) -> String {
            self.name.to_string()
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn config(threads: &[usize], trials: usize) -> ExecutionConfig {
        ExecutionConfig {
            threads: threads.to_vec(),
            trials,
            raw: false,
            stream_json: false,
            progress: false,
        }
    }

    fn executor(cfg: ExecutionConfig, clock: ScriptedClock) -> (Executor<ScriptedClock>, SharedBuf) {
        let buf = SharedBuf::default();
        (Executor::with_clock(cfg, clock).with_console(buf.clone()), buf)
    }

    #[test]
    fn test_read_only_workload_resets_once() {
        let target = MockTarget::new(100);
        let (workload, counters) = Counting::new("find", true);
        let adapter = WorkloadAdapter::new(workload);
        let (mut exec, _) = executor(config(&[1, 2, 4], 3), ScriptedClock::fixed(Duration::from_millis(10)));

        let outcomes = exec.execute(&[&adapter], &target).unwrap();

        assert!(outcomes[0].is_ok());
        assert_eq!(counters.resets.load(Ordering::SeqCst), 1);
        // 3 trials x (1 + 2 + 4) workers
        assert_eq!(counters.runs.load(Ordering::SeqCst), 21);
    }

    #[test]
    fn test_mutating_workload_resets_every_trial() {
        let target = MockTarget::new(100);
        let (workload, counters) = Counting::new("insert", false);
        let adapter = WorkloadAdapter::new(workload);
        let (mut exec, _) = executor(config(&[1, 2, 4], 3), ScriptedClock::fixed(Duration::from_millis(10)));

        exec.execute(&[&adapter], &target).unwrap();

        assert_eq!(counters.resets.load(Ordering::SeqCst), 9);
    }

    #[test]
    fn test_forced_one_second_trials() {
        let target = MockTarget::new(1000);
        let (workload, _) = Counting::new("steady", false);
        let adapter = WorkloadAdapter::new(workload);
        let (mut exec, _) = executor(config(&[1], 5), ScriptedClock::fixed(Duration::from_secs(1)));

        let outcomes = exec.execute(&[&adapter], &target).unwrap();
        let report = outcomes.into_iter().next().unwrap().unwrap();
        let level = report.level(1).unwrap();

        assert_eq!(level.samples, vec![1000.0; 5]);
        assert_eq!(level.ops_per_sec, 1000.0);
        assert_eq!(level.elapsed_secs, 1.0);
        assert_eq!(level.variance, 0.0);
        assert_eq!(level.std_dev, 0.0);
        assert_eq!(level.rsd, 0.0);
        assert_eq!(level.speedup, Some(1.0));
    }

    #[test]
    fn test_speedup_against_single_thread_baseline() {
        let target = MockTarget::new(1000);
        let (workload, _) = Counting::new("scaling", false);
        let adapter = WorkloadAdapter::new(workload);
        let clock = ScriptedClock::new([
            Duration::from_secs(2),
            Duration::from_secs(2),
            Duration::from_millis(500),
            Duration::from_millis(500),
        ]);
        let (mut exec, _) = executor(config(&[1, 4], 2), clock);

        let outcomes = exec.execute(&[&adapter], &target).unwrap();
        let report = outcomes.into_iter().next().unwrap().unwrap();

        assert_eq!(report.level(1).unwrap().elapsed_secs, 2.0);
        assert_eq!(report.level(1).unwrap().speedup, Some(1.0));
        assert_eq!(report.level(4).unwrap().elapsed_secs, 0.5);
        assert_eq!(report.level(4).unwrap().speedup, Some(4.0));
        let levels: Vec<_> = report.results.iter().map(|l| l.threads).collect();
        assert_eq!(levels, [1, 4]);
    }

    #[test]
    fn test_levels_before_baseline_have_no_speedup() {
        let target = MockTarget::new(10);
        let (workload, _) = Counting::new("late_baseline", true);
        let adapter = WorkloadAdapter::new(workload);
        let (mut exec, _) = executor(config(&[2, 1, 4], 1), ScriptedClock::fixed(Duration::from_secs(1)));

        let outcomes = exec.execute(&[&adapter], &target).unwrap();
        let report = outcomes.into_iter().next().unwrap().unwrap();

        assert_eq!(report.level(2).unwrap().speedup, None);
        assert_eq!(report.level(1).unwrap().speedup, Some(1.0));
        assert_eq!(report.level(4).unwrap().speedup, Some(1.0));
    }

    #[test]
    fn test_target_error_aborts_only_failing_workload() {
        let target = MockTarget {
            iterations: 50,
            fail_at_threads: Some(2),
            ..Default::default()
        };
        let (first, first_counters) = Counting::new("first", false);
        let first = WorkloadAdapter::new(first);
        let (mut exec, _) = executor(config(&[1, 2, 4], 2), ScriptedClock::fixed(Duration::from_millis(5)));

        let outcomes = exec.execute(&[&first], &target).unwrap();
        let failure = outcomes.into_iter().next().unwrap().unwrap_err();

        assert_eq!(failure.name, "first");
        assert_eq!(failure.threads, Some(2));
        assert!(matches!(
            failure.error,
            HarnessError::Target {
                phase: Phase::Run,
                ..
            }
        ));
        assert_eq!(failure_kind(&failure.error), "target");
        // Level 1 (2 trials) plus the first trial at level 2; level 4 never ran
        assert_eq!(first_counters.resets.load(Ordering::SeqCst), 3);
        assert_eq!(first_counters.runs.load(Ordering::SeqCst), 2 + 2);

        // An independent workload against a healthy target still reports fully
        let healthy = MockTarget::new(50);
        let (second, _) = Counting::new("second", true);
        let second = WorkloadAdapter::new(second);
        let outcomes = exec.execute(&[&first, &second], &healthy).unwrap();
        assert!(outcomes.iter().all(|o| o.is_ok()));
        assert_eq!(outcomes[1].as_ref().unwrap().results.len(), 3);
    }

    #[test]
    fn test_failure_does_not_stop_later_workloads() {
        struct Broken;

        impl Workload<MockTarget> for Broken {
            fn run(&self, thread: usize, threads: usize, _target: &MockTarget) -> anyhow::Result<()> {
                if threads == 2 && thread == 1 {
                    anyhow::bail!("cursor not found");
                }
                Ok(())
            }

            fn reset(&self, _target: &MockTarget) -> anyhow::Result<()> {
                Ok(())
            }

            fn read_only(&self) -> bool {
                false
            }
        }

        let target = MockTarget::new(20);
        let broken = WorkloadAdapter::new(Broken);
        let (healthy, _) = Counting::new("healthy", false);
        let healthy = WorkloadAdapter::new(healthy);
        let (mut exec, _) = executor(config(&[1, 2], 2), ScriptedClock::fixed(Duration::from_millis(5)));

        let outcomes = exec.execute(&[&broken, &healthy], &target).unwrap();

        let failure = outcomes[0].as_ref().unwrap_err();
        assert_eq!(failure.name, "Broken");
        assert!(matches!(failure.error, HarnessError::Worker { thread: 1, threads: 2, .. }));
        assert_eq!(failure_kind(&failure.error), "worker");
        assert!(failure.to_string().starts_with("Broken (2 threads):"));

        let report = outcomes[1].as_ref().unwrap();
        assert_eq!(report.name, "healthy");
        assert_eq!(report.results.len(), 2);
    }

    #[test]
    fn test_invalid_configuration_runs_nothing() {
        let target = MockTarget::new(1);
        let (workload, counters) = Counting::new("never", false);
        let adapter = WorkloadAdapter::new(workload);

        for cfg in [config(&[], 3), config(&[1, 2], 0), config(&[1, 0], 3), config(&[1, 2, 1], 3)] {
            let (mut exec, _) = executor(cfg, ScriptedClock::fixed(Duration::from_millis(1)));
            let err = exec.execute(&[&adapter], &target).unwrap_err();
            assert!(matches!(err, HarnessError::Precondition(_)));
        }

        assert_eq!(counters.resets.load(Ordering::SeqCst), 0);
        assert_eq!(counters.runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_raw_mode_streams_one_line_per_level() {
        let target = MockTarget {
            iterations: 1000,
            raw: true,
            ..Default::default()
        };
        let (workload, _) = Counting::new("raw", true);
        let adapter = WorkloadAdapter::new(workload);
        let mut cfg = config(&[1, 2], 2);
        cfg.stream_json = true;
        let clock = ScriptedClock::new([
            Duration::from_secs(1),
            Duration::from_secs(1),
            Duration::from_millis(500),
        ]);
        let (mut exec, buf) = executor(cfg, clock);

        exec.execute(&[&adapter], &target).unwrap();

        // Raw mode suppresses the JSON stream
        assert_eq!(
            buf.contents(),
            "Threads: 1 ops/sec: 1000\nThreads: 2 ops/sec: 2000\n"
        );
    }

    #[test]
    fn test_json_stream_one_line_per_workload() {
        let target = MockTarget::new(100);
        let (a, _) = Counting::new("a", true);
        let (b, _) = Counting::new("b", false);
        let (a, b) = (WorkloadAdapter::new(a), WorkloadAdapter::new(b));
        let mut cfg = config(&[1], 1);
        cfg.stream_json = true;
        let (mut exec, buf) = executor(cfg, ScriptedClock::fixed(Duration::from_secs(1)));

        exec.execute(&[&a, &b], &target).unwrap();

        let contents = buf.contents();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "a");
        assert_eq!(first["results"]["1"]["ops_per_sec"], 100.0);
    }

    #[test]
    fn test_execute_suite_runs_all_registered() {
        let (a, a_counters) = Counting::new("a", true);
        let (b, b_counters) = Counting::new("b", true);
        let suite = Suite::new(MockTarget::new(5)).with(a).with(b);
        let (mut exec, _) = executor(config(&[1], 2), ScriptedClock::fixed(Duration::from_millis(1)));

        let outcomes = exec.execute_suite(&suite).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(a_counters.runs.load(Ordering::SeqCst), 2);
        assert_eq!(b_counters.runs.load(Ordering::SeqCst), 2);
    }
}
