//! Workload Planner
//!
//! Selects which registered workloads run. Workloads keep their registration
//! order; the filter is a regex matched against display names.

use threadbench_core::{Target, WorkloadAdapter};

/// Execution plan for a sweep
pub struct ExecutionPlan<'a, T> {
    /// Workloads to run, in registration order
    pub workloads: Vec<&'a WorkloadAdapter<T>>,
}

/// Build execution plan from registered workloads
pub fn build_plan<'a, T: Target>(
    workloads: impl IntoIterator<Item = &'a WorkloadAdapter<T>>,
    filter: Option<&regex::Regex>,
) -> ExecutionPlan<'a, T> {
    let workloads = workloads
        .into_iter()
        .filter(|w| filter.is_none_or(|re| re.is_match(w.name())))
        .collect();

    ExecutionPlan { workloads }
}
