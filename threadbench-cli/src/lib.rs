#![warn(missing_docs)]
//! ThreadBench CLI Library
//!
//! This module provides the CLI infrastructure for benchmark binaries.
//! Build a [`Suite`] in your main function and hand it to
//! `threadbench::run()` (or `threadbench_cli::run()`) to get the full
//! threadbench CLI experience: filtering, thread sweeps, and report output.
//!
//! # Example
//!
//! ```ignore
//! use threadbench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let suite = Suite::new(MyTarget::default()).with(MyWorkload);
//!     threadbench::run(suite)
//! }
//! ```

mod config;
mod executor;
mod planner;

pub use config::*;
pub use executor::{
    ExecutionConfig, Executor, LevelTrials, WorkloadFailure, WorkloadOutcome, build_report,
    build_report_meta, failure_kind, format_human_output,
};
pub use planner::{ExecutionPlan, build_plan};

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;
use std::time::Instant;
use threadbench_core::{Suite, Target};
use threadbench_report::{OutputFormat, Report, generate_csv_report, generate_json_report};
use tracing_subscriber::EnvFilter;

/// ThreadBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "threadbench")]
#[command(
    author,
    version,
    about = "ThreadBench - multithreaded scaling benchmarks for Rust"
)]
pub struct Cli {
    /// Optional subcommand (List, Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter workloads by regex pattern
    pub filter: Option<String>,

    /// Output format: json, human, csv (defaults to threadbench.toml, then json)
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated thread-count levels, e.g. 1,2,4,8
    #[arg(long)]
    pub threads: Option<String>,

    /// Timed trials per thread-count level
    #[arg(long)]
    pub trials: Option<usize>,

    /// Print `Threads: N ops/sec: X` lines instead of structured output
    #[arg(long)]
    pub raw: bool,

    /// Configuration file (skips threadbench.toml discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the workloads selected by the filter
    List,
    /// Run the thread sweep (default)
    Run,
    /// Print a default threadbench.toml
    Init,
}

/// Run the ThreadBench CLI against `suite`.
/// This is the main entry point for benchmark binaries.
///
/// # Returns
/// Returns `Ok(())` when every selected workload completed, or an error if
/// configuration is invalid, output cannot be written, or any workload failed.
pub fn run<T: Target>(suite: Suite<T>) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, suite)
}

/// Run the ThreadBench CLI with pre-parsed arguments.
pub fn run_with_cli<T: Target>(cli: Cli, suite: Suite<T>) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => BenchConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => BenchConfig::discover().unwrap_or_default(),
    };

    match cli.command {
        Some(Commands::List) => list_workloads(&cli, &suite),
        Some(Commands::Init) => {
            print!("{}", BenchConfig::default_toml());
            Ok(())
        }
        Some(Commands::Run) | None => run_workloads(&cli, &config, &suite),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "threadbench=debug"
    } else {
        "threadbench=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed (tests, embedding binaries)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn compile_filter(cli: &Cli) -> anyhow::Result<Option<Regex>> {
    cli.filter
        .as_deref()
        .map(|pattern| Regex::new(pattern).with_context(|| format!("invalid filter: {pattern}")))
        .transpose()
}

fn list_workloads<T: Target>(cli: &Cli, suite: &Suite<T>) -> anyhow::Result<()> {
    let filter = compile_filter(cli)?;
    let plan = build_plan(suite.workloads(), filter.as_ref());

    println!("ThreadBench Plan:");
    for workload in &plan.workloads {
        let mode = if workload.read_only() {
            " [read-only]"
        } else {
            ""
        };
        println!("├── {}{}", workload.name(), mode);
    }
    println!("{} workloads found.", plan.workloads.len());

    Ok(())
}

fn resolve_format(cli: &Cli, config: &BenchConfig) -> anyhow::Result<OutputFormat> {
    cli.format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse::<OutputFormat>()
        .map_err(anyhow::Error::msg)
}

/// Build an ExecutionConfig by layering: threadbench.toml defaults → CLI overrides.
fn build_execution_config(
    cli: &Cli,
    config: &BenchConfig,
    format: OutputFormat,
) -> anyhow::Result<ExecutionConfig> {
    let threads = match &cli.threads {
        Some(list) => BenchConfig::parse_thread_list(list)?,
        None => config.runner.threads.clone(),
    };

    Ok(ExecutionConfig {
        threads,
        trials: cli.trials.unwrap_or(config.runner.trials),
        raw: cli.raw || config.runner.raw,
        // Stream per-workload JSON lines only when stdout is the report sink
        stream_json: format == OutputFormat::Json && cli.output.is_none(),
        progress: config.runner.progress,
    })
}

fn run_workloads<T: Target>(
    cli: &Cli,
    config: &BenchConfig,
    suite: &Suite<T>,
) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let format = resolve_format(cli, config)?;
    let exec_config = build_execution_config(cli, config, format)?;
    let filter = compile_filter(cli)?;
    let plan = build_plan(suite.workloads(), filter.as_ref());

    if plan.workloads.is_empty() {
        tracing::warn!(filter = ?cli.filter, "no workloads selected");
    }

    let mut executor = Executor::new(exec_config.clone());
    let outcomes = executor.execute(&plan.workloads, suite.target())?;

    let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    let report = build_report(outcomes, &exec_config, total_duration_ms);

    write_output(cli, config, &exec_config, format, &report)?;

    if !report.failures.is_empty() {
        for failure in &report.failures {
            eprintln!("✗ {}: {}", failure.workload, failure.message);
        }
        anyhow::bail!("{} workload(s) failed", report.failures.len());
    }

    Ok(())
}

fn render(format: OutputFormat, report: &Report) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => generate_csv_report(report),
        OutputFormat::Human => format_human_output(report),
    })
}

fn write_output(
    cli: &Cli,
    config: &BenchConfig,
    exec_config: &ExecutionConfig,
    format: OutputFormat,
    report: &Report,
) -> anyhow::Result<()> {
    if let Some(ref path) = cli.output {
        let path = config.output.resolve_path(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, render(format, report)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Report written to: {}", path.display());
    } else if !exec_config.raw && !exec_config.stream_json {
        print!("{}", render(format, report)?);
    }

    Ok(())
}
