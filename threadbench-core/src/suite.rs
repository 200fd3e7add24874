//! Workload Registration
//!
//! A [`Suite`] owns the benchmark target and the workloads registered against
//! it, in registration order.

use crate::workload::{Target, Workload, WorkloadAdapter};

/// Target plus the workloads to benchmark against it
pub struct Suite<T> {
    target: T,
    workloads: Vec<WorkloadAdapter<T>>,
}

impl<T: Target> Suite<T> {
    /// Create an empty suite around `target`
    pub fn new(target: T) -> Self {
        Self {
            target,
            workloads: Vec::new(),
        }
    }

    /// Register a workload (builder style)
    #[must_use]
    pub fn with(mut self, workload: impl Workload<T> + 'static) -> Self {
        self.add(workload);
        self
    }

    /// Register a workload
    pub fn add(&mut self, workload: impl Workload<T> + 'static) -> &mut Self {
        self.workloads.push(WorkloadAdapter::new(workload));
        self
    }

    /// Shared benchmark target
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Registered workloads in registration order
    pub fn workloads(&self) -> &[WorkloadAdapter<T>] {
        &self.workloads
    }

    /// Number of registered workloads
    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    /// Whether no workloads are registered
    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }
}

impl<T> std::fmt::Debug for Suite<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite")
            .field("workloads", &self.workloads)
            .finish_non_exhaustive()
    }
}
