// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator: owns the registry and aggregator and routes every job to
//! the adapter chosen for it.
//!
//! Adapters are injected in registration order, which is also the selector's
//! tie-break order. The orchestrator never branches on provider identity.

use crate::error::OrchestratorError;
use crate::metrics::MetricsAggregator;
use crate::monitor::{self, MonitorConfig, MonitorTargets};
use crate::registry::{JobEntry, JobRegistry};
use crate::report::{self, JobStatusReport, PerformanceReport};
use crate::selector::{self, Selection};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uk_adapters::ProviderAdapter;
use uk_core::{AutomationJob, Clock, JobStatus, ProviderId, RegistrationId, SystemClock};

pub struct Orchestrator<K: Clock = SystemClock> {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    registry: Arc<JobRegistry>,
    metrics: Arc<MetricsAggregator>,
    monitor_config: MonitorConfig,
    clock: K,
}

/// Outcome of [`Orchestrator::cleanup`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub cancelled: Vec<String>,
    pub failed: Vec<CleanupFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupFailure {
    pub job: String,
    pub error: String,
}

/// Background monitor started by [`Orchestrator::spawn_monitor`].
pub struct MonitorHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Stop starting new cycles and wait for in-flight polls to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "monitor task failed");
        }
    }
}

impl Orchestrator {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Result<Self, OrchestratorError> {
        Self::with_clock(adapters, SystemClock)
    }
}

impl<K: Clock> Orchestrator<K> {
    /// Fails when `adapters` is empty or two adapters share an id.
    pub fn with_clock(
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        clock: K,
    ) -> Result<Self, OrchestratorError> {
        if adapters.is_empty() {
            return Err(OrchestratorError::NoProviders);
        }
        let mut seen = HashSet::new();
        for adapter in &adapters {
            let id = adapter.id();
            if !seen.insert(id.clone()) {
                return Err(OrchestratorError::DuplicateProvider(id));
            }
        }
        let providers: Vec<String> = adapters.iter().map(|a| a.id().to_string()).collect();
        tracing::info!(providers = %providers.join(","), "orchestrator initialized");
        Ok(Self {
            adapters,
            registry: Arc::new(JobRegistry::new()),
            metrics: Arc::new(MetricsAggregator::new()),
            monitor_config: MonitorConfig::default(),
            clock,
        })
    }

    pub fn monitor_config(mut self, config: MonitorConfig) -> Self {
        self.monitor_config = config;
        self
    }

    /// Provider ids in registration order.
    pub fn providers(&self) -> Vec<ProviderId> {
        self.adapters.iter().map(|a| a.id()).collect()
    }

    fn adapter(&self, id: &ProviderId) -> Option<&Arc<dyn ProviderAdapter>> {
        self.adapters.iter().find(|a| a.id() == *id)
    }

    /// Validate, assign a provider and register the job.
    ///
    /// Metrics are initialized before the job becomes visible in the
    /// registry, so readers never see a job without counters.
    pub fn add_job(&self, job: AutomationJob) -> Result<Selection, OrchestratorError> {
        job.validate()?;
        if self.registry.contains(&job.name) {
            return Err(OrchestratorError::DuplicateJob(job.name));
        }
        let selection = selector::select(&job, &self.adapters)?;

        self.metrics.ensure(&job.name);
        let name = job.name.clone();
        if !self.registry.insert(JobEntry::new(job, selection.provider.clone())) {
            return Err(OrchestratorError::DuplicateJob(name));
        }
        tracing::info!(job = %name, provider = %selection.provider, explicit = selection.is_explicit(), "job added");
        Ok(selection)
    }

    /// Register the job with its assigned provider.
    ///
    /// The job is claimed before the provider is called, so a concurrent
    /// deploy of the same job fails with `AlreadyDeployed`.
    pub async fn deploy_job(&self, name: &str) -> Result<RegistrationId, OrchestratorError> {
        let entry = self.registry.claim_deploy(name)?;
        let Some(adapter) = self.adapter(&entry.provider) else {
            self.registry.release_deploy(name);
            return Err(OrchestratorError::ProviderNotInitialized(entry.provider));
        };

        let span = tracing::info_span!("deploy", job = %name, provider = %entry.provider);
        let registration = match adapter.deploy(&entry.job).instrument(span).await {
            Ok(registration) => registration,
            Err(source) => {
                self.registry.release_deploy(name);
                return Err(OrchestratorError::Provider { job: name.to_string(), source });
            }
        };

        self.registry.mark_deployed(name, registration.clone(), self.clock.epoch_ms());
        tracing::info!(job = %name, provider = %entry.provider, registration = %registration, "job deployed");
        Ok(registration)
    }

    /// Cancel a job. Inactive jobs are left alone; jobs that never deployed
    /// are marked inactive without contacting the provider.
    pub async fn cancel_job(&self, name: &str) -> Result<(), OrchestratorError> {
        let entry =
            self.registry.get(name).ok_or_else(|| OrchestratorError::JobNotFound(name.to_string()))?;
        if !entry.job.active {
            tracing::debug!(job = %name, "job already inactive");
            return Ok(());
        }
        if entry.deploying {
            return Err(OrchestratorError::DeployInProgress(name.to_string()));
        }

        if let Some(registration) = &entry.registration {
            let adapter = self
                .adapter(&entry.provider)
                .ok_or_else(|| OrchestratorError::ProviderNotInitialized(entry.provider.clone()))?;
            let span = tracing::info_span!("cancel", job = %name, provider = %entry.provider);
            adapter
                .cancel(name, registration)
                .instrument(span)
                .await
                .map_err(|source| OrchestratorError::Provider { job: name.to_string(), source })?;
        }

        self.registry.mark_cancelled(name);
        tracing::info!(job = %name, "job cancelled");
        Ok(())
    }

    /// Run the polling loops until `cancel` fires. Returns once every loop
    /// has finished its in-flight cycle.
    pub async fn monitor(&self, cancel: CancellationToken) {
        monitor::run(self.adapters.clone(), self.targets(), self.monitor_config.clone(), cancel).await
    }

    /// Start [`Self::monitor`] on a background task.
    pub fn spawn_monitor(&self) -> MonitorHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(monitor::run(
            self.adapters.clone(),
            self.targets(),
            self.monitor_config.clone(),
            cancel.clone(),
        ));
        MonitorHandle { cancel, task }
    }

    fn targets(&self) -> MonitorTargets {
        MonitorTargets { registry: Arc::clone(&self.registry), metrics: Arc::clone(&self.metrics) }
    }

    pub fn get_job_status(&self) -> JobStatusReport {
        report::job_status(&self.registry.snapshot(), &self.metrics.snapshot())
    }

    pub fn get_performance_report(&self) -> PerformanceReport {
        report::performance(&self.registry.snapshot(), &self.metrics.snapshot(), &self.adapters)
    }

    /// Cancel every active job. Failures are logged and reported; they do
    /// not stop the remaining cancellations.
    pub async fn cleanup(&self) -> CleanupReport {
        let mut report = CleanupReport::default();
        for name in self.registry.active_names() {
            match self.cancel_job(&name).await {
                Ok(()) => report.cancelled.push(name),
                Err(e) => {
                    tracing::error!(job = %name, error = %e, "failed to cancel job during cleanup");
                    report.failed.push(CleanupFailure { job: name, error: e.to_string() });
                }
            }
        }
        tracing::info!(cancelled = report.cancelled.len(), failed = report.failed.len(), "cleanup finished");
        report
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
