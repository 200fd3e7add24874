//! Counter scaling demo
//!
//! Sweeps two workloads over a set of striped atomic counters:
//! - `Increment` mutates the counters and is reset before every trial
//! - `Snapshot` only reads them, so the counters are seeded once
//!
//! Run with: `cargo run --release --example counter -- --format human`
//! or `cargo run --release --example counter -- --threads 1,2,4 --trials 5 --raw`

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use threadbench::prelude::*;

/// Operations per trial, split evenly across the workers
const OPS_PER_TRIAL: u64 = 1 << 20;
const STRIPES: usize = 64;

/// Striped counters shared by every worker
struct Counters {
    stripes: Vec<AtomicU64>,
    last_error: Mutex<Option<String>>,
}

impl Counters {
    fn new() -> Self {
        Self {
            stripes: (0..STRIPES).map(|_| AtomicU64::new(0)).collect(),
            last_error: Mutex::new(None),
        }
    }

    fn total(&self) -> u64 {
        self.stripes.iter().map(|s| s.load(Ordering::Relaxed)).sum()
    }

    fn fail(&self, message: String) {
        if let Ok(mut slot) = self.last_error.lock() {
            slot.get_or_insert(message);
        }
    }
}

impl Target for Counters {
    fn last_error(&self, _thread: Option<usize>) -> Option<String> {
        self.last_error.lock().ok().and_then(|slot| slot.clone())
    }

    fn iterations(&self) -> u64 {
        OPS_PER_TRIAL
    }
}

fn share(thread: usize, threads: usize) -> u64 {
    let base = OPS_PER_TRIAL / threads as u64;
    // The first worker picks up the remainder
    if thread == 0 {
        base + OPS_PER_TRIAL % threads as u64
    } else {
        base
    }
}

struct Increment;

impl Workload<Counters> for Increment {
    fn run(&self, thread: usize, threads: usize, target: &Counters) -> anyhow::Result<()> {
        let stripe = &target.stripes[thread % STRIPES];
        for _ in 0..share(thread, threads) {
            stripe.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    fn reset(&self, target: &Counters) -> anyhow::Result<()> {
        for stripe in &target.stripes {
            stripe.store(0, Ordering::Relaxed);
        }
        Ok(())
    }

    fn read_only(&self) -> bool {
        false
    }
}

struct Snapshot;

impl Workload<Counters> for Snapshot {
    fn run(&self, thread: usize, threads: usize, target: &Counters) -> anyhow::Result<()> {
        let reads = share(thread, threads) / STRIPES as u64;
        for _ in 0..reads {
            let total = std::hint::black_box(target.total());
            if total != STRIPES as u64 {
                target.fail(format!("snapshot saw {total} instead of {STRIPES}"));
                break;
            }
        }
        Ok(())
    }

    fn reset(&self, target: &Counters) -> anyhow::Result<()> {
        for stripe in &target.stripes {
            stripe.store(1, Ordering::Relaxed);
        }
        Ok(())
    }

    fn read_only(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        "Counters.Snapshot".to_string()
    }
}

fn main() -> anyhow::Result<()> {
    let suite = Suite::new(Counters::new()).with(Snapshot).with(Increment);
    threadbench::run(suite)
}
