// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metrics aggregator: the only writer of [`ExecutionMetrics`].

use indexmap::IndexMap;
use parking_lot::RwLock;
use uk_core::{ExecutionMetrics, ExecutionRecord};

#[derive(Default)]
pub struct MetricsAggregator {
    metrics: RwLock<IndexMap<String, ExecutionMetrics>>,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a job with zeroed counters. Existing counters are kept.
    pub fn ensure(&self, job: &str) {
        self.metrics.write().entry(job.to_string()).or_default();
    }

    /// Fold a record into its job's counters.
    ///
    /// Returns `false` for untracked jobs and for records no newer than the
    /// last one applied.
    pub fn apply(&self, record: &ExecutionRecord) -> bool {
        match self.metrics.write().get_mut(&record.job) {
            Some(metrics) => metrics.apply(record),
            None => {
                tracing::debug!(job = %record.job, "record for untracked job dropped");
                false
            }
        }
    }

    pub fn get(&self, job: &str) -> Option<ExecutionMetrics> {
        self.metrics.read().get(job).cloned()
    }

    pub fn snapshot(&self) -> IndexMap<String, ExecutionMetrics> {
        self.metrics.read().clone()
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
