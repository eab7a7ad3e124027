// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling loops.
//!
//! One loop per adapter, all on one [`JoinSet`]. Each cycle polls the adapter,
//! folds new records into the aggregator, then sleeps for the adapter's poll
//! interval. A cycle that reported any per-job error stretches the sleep
//! exponentially up to `max_backoff`; a clean cycle resets it.
//!
//! Cancellation is only observed between cycles, so an in-flight poll always
//! completes and its records are kept.

use crate::metrics::MetricsAggregator;
use crate::registry::JobRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uk_adapters::ProviderAdapter;
use uk_core::{ExecutionRecord, ProviderId};

/// Backoff settings shared by every polling loop.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub max_backoff: Duration,
    pub backoff_multiplier: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { max_backoff: Duration::from_secs(300), backoff_multiplier: 2 }
    }
}

impl MonitorConfig {
    uk_core::setters! {
        set {
            max_backoff: Duration,
            backoff_multiplier: u32,
        }
    }

    /// Sleep before the next cycle after `failures` consecutive failed cycles.
    pub fn delay(&self, interval: Duration, failures: u32) -> Duration {
        let factor = self.backoff_multiplier.max(1).saturating_pow(failures);
        let delay = interval.saturating_mul(factor);
        delay.min(self.max_backoff.max(interval))
    }
}

/// Shared state the loops write into.
#[derive(Clone)]
pub(crate) struct MonitorTargets {
    pub registry: Arc<JobRegistry>,
    pub metrics: Arc<MetricsAggregator>,
}

/// Run every adapter's loop until `cancel` fires and all loops have stopped.
pub(crate) async fn run(
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    targets: MonitorTargets,
    config: MonitorConfig,
    cancel: CancellationToken,
) {
    let mut loops = JoinSet::new();
    for adapter in adapters {
        let provider = adapter.id();
        let span = tracing::info_span!("monitor", provider = %provider);
        loops.spawn(
            poll_loop(adapter, targets.clone(), config.clone(), cancel.clone()).instrument(span),
        );
    }
    tracing::info!(loops = loops.len(), "monitor started");

    while let Some(result) = loops.join_next().await {
        if let Err(e) = result {
            tracing::error!(error = %e, "polling loop aborted");
        }
    }
    tracing::info!("monitor stopped");
}

async fn poll_loop(
    adapter: Arc<dyn ProviderAdapter>,
    targets: MonitorTargets,
    config: MonitorConfig,
    cancel: CancellationToken,
) {
    let provider = adapter.id();
    let interval = adapter.poll_interval();
    let mut failures: u32 = 0;

    while !cancel.is_cancelled() {
        let outcome = adapter.poll().await;
        let applied = fold(&provider, &outcome.records, &targets);
        if applied > 0 {
            tracing::info!(applied, "executions recorded");
        }

        if outcome.errors.is_empty() {
            failures = 0;
        } else {
            failures = failures.saturating_add(1);
            tracing::warn!(errors = outcome.errors.len(), failures, "poll cycle had errors");
        }

        let delay = config.delay(interval, failures);
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }
    tracing::debug!("polling loop exiting");
}

/// Apply records for jobs assigned to `provider`. Returns how many were new.
pub(crate) fn fold(
    provider: &ProviderId,
    records: &[ExecutionRecord],
    targets: &MonitorTargets,
) -> usize {
    let mut applied = 0;
    for record in records {
        match targets.registry.provider_of(&record.job) {
            Some(assigned) if assigned == *provider => {
                if targets.metrics.apply(record) {
                    targets.registry.record_execution(&record.job, record.timestamp_ms);
                    applied += 1;
                }
            }
            Some(assigned) => {
                tracing::warn!(job = %record.job, assigned = %assigned, "record from unassigned provider dropped");
            }
            None => {
                tracing::debug!(job = %record.job, "record for unknown job dropped");
            }
        }
    }
    applied
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
