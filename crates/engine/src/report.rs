// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status and performance reports.
//!
//! Both are computed on demand from the registry and aggregator; nothing here
//! is cached.

use crate::registry::JobEntry;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use uk_adapters::{ProviderAdapter, ProviderSummary};
use uk_core::{ratio, ExecutionMetrics, JobStatus, Priority, ProviderId, RegistrationId};

/// Snapshot of every job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatusReport {
    pub total_jobs: usize,
    pub active_jobs: usize,
    /// Job count per assigned provider
    pub provider_distribution: IndexMap<ProviderId, usize>,
    pub jobs: IndexMap<String, JobStatusEntry>,
}

impl JobStatusReport {
    pub fn job(&self, name: &str) -> Option<&JobStatusEntry> {
        self.jobs.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatusEntry {
    pub provider: ProviderId,
    pub status: JobStatus,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<RegistrationId>,
    pub target: String,
    pub function: String,
    pub gas_limit: u64,
    pub frequency_secs: u64,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_ms: Option<u64>,
    pub metrics: ExecutionMetrics,
    pub success_rate: f64,
}

/// Aggregate execution performance across all jobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub total_executions: u64,
    pub successful_executions: u64,
    pub success_rate: f64,
    pub total_gas_used: u64,
    pub total_fees_paid: u128,
    pub average_gas_per_execution: f64,
    pub providers: IndexMap<ProviderId, ProviderPerformance>,
    pub jobs: IndexMap<String, JobPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderPerformance {
    /// Jobs assigned to this provider
    pub job_count: usize,
    pub active_jobs: usize,
    /// Relative cost multiplier used by the selector
    pub cost_per_gas_unit: u64,
    /// The adapter's own view of the jobs it manages
    pub adapter: ProviderSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPerformance {
    pub provider: ProviderId,
    pub executions: u64,
    pub success_rate: f64,
    pub gas_per_execution: f64,
    /// Mean gas used as a fraction of the job's gas limit
    pub gas_utilization: f64,
    pub total_fees_paid: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

pub(crate) fn job_status(
    entries: &[JobEntry],
    metrics: &IndexMap<String, ExecutionMetrics>,
) -> JobStatusReport {
    let mut provider_distribution = IndexMap::new();
    let mut jobs = IndexMap::new();
    for entry in entries {
        *provider_distribution.entry(entry.provider.clone()).or_insert(0) += 1;
        let job_metrics = metrics.get(&entry.job.name).cloned().unwrap_or_default();
        jobs.insert(
            entry.job.name.clone(),
            JobStatusEntry {
                provider: entry.provider.clone(),
                status: entry.status,
                active: entry.job.active,
                registration: entry.registration.clone(),
                target: entry.job.target.clone(),
                function: entry.job.function.clone(),
                gas_limit: entry.job.gas_limit,
                frequency_secs: entry.job.frequency_secs,
                priority: entry.job.priority,
                created_at_ms: entry.job.created_at_ms,
                success_rate: job_metrics.success_rate(),
                metrics: job_metrics,
            },
        );
    }
    JobStatusReport {
        total_jobs: entries.len(),
        active_jobs: entries.iter().filter(|e| e.job.active).count(),
        provider_distribution,
        jobs,
    }
}

pub(crate) fn performance(
    entries: &[JobEntry],
    metrics: &IndexMap<String, ExecutionMetrics>,
    adapters: &[Arc<dyn ProviderAdapter>],
) -> PerformanceReport {
    let mut total_executions = 0u64;
    let mut successful_executions = 0u64;
    let mut total_gas_used = 0u64;
    let mut total_fees_paid = 0u128;
    let mut jobs = IndexMap::new();

    for entry in entries {
        let m = metrics.get(&entry.job.name).cloned().unwrap_or_default();
        total_executions += m.total_executions;
        successful_executions += m.successful_executions;
        total_gas_used = total_gas_used.saturating_add(m.total_gas_used);
        total_fees_paid = total_fees_paid.saturating_add(m.total_fees_paid);

        let gas_per_execution = m.gas_per_execution();
        let gas_utilization = if entry.job.gas_limit == 0 {
            0.0
        } else {
            gas_per_execution / entry.job.gas_limit as f64
        };
        jobs.insert(
            entry.job.name.clone(),
            JobPerformance {
                provider: entry.provider.clone(),
                executions: m.total_executions,
                success_rate: m.success_rate(),
                gas_per_execution,
                gas_utilization,
                total_fees_paid: m.total_fees_paid,
                last_error: m.last_error.clone(),
            },
        );
    }

    let providers = adapters
        .iter()
        .map(|adapter| {
            let id = adapter.id();
            let assigned = entries.iter().filter(|e| e.provider == id);
            let performance = ProviderPerformance {
                job_count: assigned.clone().count(),
                active_jobs: assigned.filter(|e| e.job.active).count(),
                cost_per_gas_unit: adapter.cost_per_gas_unit(),
                adapter: adapter.summary(),
            };
            (id, performance)
        })
        .collect();

    PerformanceReport {
        total_executions,
        successful_executions,
        success_rate: ratio(successful_executions, total_executions),
        total_gas_used,
        total_fees_paid,
        average_gas_per_execution: ratio(total_gas_used, total_executions),
        providers,
        jobs,
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
