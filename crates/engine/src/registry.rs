// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job registry: definitions, provider assignments and lifecycle state.
//!
//! Jobs are never removed. Cancelling only flips `active` and moves the job to
//! [`JobStatus::Cancelled`], so names stay unique for the process lifetime.

use crate::error::OrchestratorError;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;
use uk_core::{AutomationJob, JobStatus, ProviderId, RegistrationId};

/// A job and everything the orchestrator knows about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobEntry {
    pub job: AutomationJob,
    /// Set once at add time
    pub provider: ProviderId,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<RegistrationId>,
    /// A deploy call is in flight
    #[serde(skip)]
    pub deploying: bool,
}

impl JobEntry {
    pub fn new(job: AutomationJob, provider: ProviderId) -> Self {
        Self { job, provider, status: JobStatus::Registered, registration: None, deploying: false }
    }
}

/// Insertion-ordered job table.
#[derive(Default)]
pub struct JobRegistry {
    jobs: RwLock<IndexMap<String, JobEntry>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the name is taken. Returns `false` on a duplicate and
    /// leaves the existing entry untouched.
    pub fn insert(&self, entry: JobEntry) -> bool {
        let mut jobs = self.jobs.write();
        if jobs.contains_key(&entry.job.name) {
            return false;
        }
        jobs.insert(entry.job.name.clone(), entry);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.jobs.read().contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<JobEntry> {
        self.jobs.read().get(name).cloned()
    }

    pub fn provider_of(&self, name: &str) -> Option<ProviderId> {
        self.jobs.read().get(name).map(|e| e.provider.clone())
    }

    pub fn snapshot(&self) -> Vec<JobEntry> {
        self.jobs.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.read().is_empty()
    }

    /// Names of jobs still active, in insertion order.
    pub fn active_names(&self) -> Vec<String> {
        self.jobs.read().values().filter(|e| e.job.active).map(|e| e.job.name.clone()).collect()
    }

    /// Reserve a job for deployment. At most one claim per job is
    /// outstanding until [`Self::mark_deployed`] or [`Self::release_deploy`].
    pub fn claim_deploy(&self, name: &str) -> Result<JobEntry, OrchestratorError> {
        let mut jobs = self.jobs.write();
        let entry =
            jobs.get_mut(name).ok_or_else(|| OrchestratorError::JobNotFound(name.to_string()))?;
        if entry.status == JobStatus::Deployed || entry.deploying {
            return Err(OrchestratorError::AlreadyDeployed(name.to_string()));
        }
        if !entry.job.active || entry.status.is_terminal() {
            return Err(OrchestratorError::JobInactive(name.to_string()));
        }
        entry.deploying = true;
        Ok(entry.clone())
    }

    /// Drop a claim after a failed deploy.
    pub fn release_deploy(&self, name: &str) {
        if let Some(entry) = self.jobs.write().get_mut(name) {
            entry.deploying = false;
        }
    }

    pub fn mark_deployed(&self, name: &str, registration: RegistrationId, created_at_ms: u64) {
        if let Some(entry) = self.jobs.write().get_mut(name) {
            entry.deploying = false;
            entry.status = JobStatus::Deployed;
            entry.registration = Some(registration);
            entry.job.created_at_ms = Some(created_at_ms);
        }
    }

    pub fn mark_cancelled(&self, name: &str) {
        if let Some(entry) = self.jobs.write().get_mut(name) {
            entry.status = JobStatus::Cancelled;
            entry.job.active = false;
        }
    }

    /// Advance the job's last-execution stamp. Older stamps are ignored.
    pub fn record_execution(&self, name: &str, timestamp_ms: u64) {
        if let Some(entry) = self.jobs.write().get_mut(name) {
            if entry.job.last_execution_ms.map_or(true, |last| timestamp_ms > last) {
                entry.job.last_execution_ms = Some(timestamp_ms);
            }
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
