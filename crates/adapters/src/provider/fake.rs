// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory provider adapter for orchestrator tests.

use super::{
    KeeperProfile, PollError, PollOutcome, ProviderAdapter, ProviderError, ProviderProfile,
    ProviderSummary, RelayProfile,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use uk_core::{AutomationJob, ExecutionRecord, ProviderId, RegistrationId};

/// Recorded adapter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Deploy { job: String },
    Cancel { job: String, registration: RegistrationId },
    Poll,
}

#[derive(Default)]
struct FakeProviderState {
    calls: Vec<ProviderCall>,
    deployed: u64,
    deploy_errors: VecDeque<ProviderError>,
    cancel_errors: HashMap<String, ProviderError>,
    pending_records: VecDeque<ExecutionRecord>,
    pending_errors: VecDeque<PollError>,
    active: HashSet<String>,
    jobs: HashSet<String>,
    observed: u64,
    last_execution_ms: Option<u64>,
}

/// Fake [`ProviderAdapter`] with scriptable outcomes.
///
/// Deploys hand out `{provider}-{n}`. Each poll returns every record queued
/// since the previous poll.
#[derive(Clone)]
pub struct FakeProviderAdapter {
    id: ProviderId,
    cost_per_gas_unit: u64,
    base_reliability: u32,
    profile: Option<Arc<dyn ProviderProfile>>,
    poll_interval: Duration,
    poll_delay: Duration,
    deploy_delay: Duration,
    inner: Arc<Mutex<FakeProviderState>>,
}

impl FakeProviderAdapter {
    /// Adapter with no feature bonus for any job.
    pub fn new(id: impl Into<ProviderId>, cost_per_gas_unit: u64, base_reliability: u32) -> Self {
        Self {
            id: id.into(),
            cost_per_gas_unit,
            base_reliability,
            profile: None,
            poll_interval: Duration::from_millis(10),
            poll_delay: Duration::ZERO,
            deploy_delay: Duration::ZERO,
            inner: Arc::new(Mutex::new(FakeProviderState::default())),
        }
    }

    /// Scores exactly like the keeper adapter.
    pub fn keeper() -> Self {
        Self::with_profile(KeeperProfile)
    }

    /// Scores exactly like the relay adapter.
    pub fn relay() -> Self {
        Self::with_profile(RelayProfile)
    }

    fn with_profile(profile: impl ProviderProfile) -> Self {
        let mut fake = Self::new(profile.id(), profile.cost_per_gas_unit(), profile.base_reliability());
        fake.profile = Some(Arc::new(profile));
        fake
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Make every poll take this long before answering.
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    /// Make every deploy take this long before answering.
    pub fn with_deploy_delay(mut self, delay: Duration) -> Self {
        self.deploy_delay = delay;
        self
    }

    pub fn fail_next_deploy(&self, error: ProviderError) {
        self.inner.lock().deploy_errors.push_back(error);
    }

    /// Fail every cancel for `job`.
    pub fn fail_cancel(&self, job: &str, error: ProviderError) {
        self.inner.lock().cancel_errors.insert(job.to_string(), error);
    }

    /// Report `record` on the next poll.
    pub fn push_record(&self, record: ExecutionRecord) {
        self.inner.lock().pending_records.push_back(record);
    }

    /// Report a per-job failure on the next poll.
    pub fn push_poll_error(&self, job: &str, error: ProviderError) {
        self.inner.lock().pending_errors.push_back(PollError { job: job.to_string(), error });
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.inner.lock().calls.clone()
    }

    pub fn deploy_count(&self) -> usize {
        self.count(|c| matches!(c, ProviderCall::Deploy { .. }))
    }

    pub fn cancel_count(&self) -> usize {
        self.count(|c| matches!(c, ProviderCall::Cancel { .. }))
    }

    pub fn poll_count(&self) -> usize {
        self.count(|c| matches!(c, ProviderCall::Poll))
    }

    fn count(&self, pred: impl Fn(&ProviderCall) -> bool) -> usize {
        self.inner.lock().calls.iter().filter(|c| pred(c)).count()
    }
}

impl ProviderProfile for FakeProviderAdapter {
    fn id(&self) -> ProviderId {
        self.id.clone()
    }

    fn cost_per_gas_unit(&self) -> u64 {
        self.cost_per_gas_unit
    }

    fn base_reliability(&self) -> u32 {
        self.base_reliability
    }

    fn feature_bonus(&self, job: &AutomationJob) -> u32 {
        self.profile.as_ref().map_or(0, |p| p.feature_bonus(job))
    }
}

#[async_trait]
impl ProviderAdapter for FakeProviderAdapter {
    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    async fn deploy(&self, job: &AutomationJob) -> Result<RegistrationId, ProviderError> {
        self.inner.lock().calls.push(ProviderCall::Deploy { job: job.name.clone() });
        if !self.deploy_delay.is_zero() {
            tokio::time::sleep(self.deploy_delay).await;
        }
        let mut state = self.inner.lock();
        if let Some(error) = state.deploy_errors.pop_front() {
            return Err(error);
        }
        state.deployed += 1;
        state.jobs.insert(job.name.clone());
        state.active.insert(job.name.clone());
        Ok(RegistrationId::new(format!("{}-{}", self.id, state.deployed)))
    }

    async fn cancel(&self, job: &str, registration: &RegistrationId) -> Result<(), ProviderError> {
        let mut state = self.inner.lock();
        state.calls.push(ProviderCall::Cancel {
            job: job.to_string(),
            registration: registration.clone(),
        });
        if let Some(error) = state.cancel_errors.get(job) {
            return Err(error.clone());
        }
        state.active.remove(job);
        Ok(())
    }

    async fn poll(&self) -> PollOutcome {
        self.inner.lock().calls.push(ProviderCall::Poll);
        if !self.poll_delay.is_zero() {
            tokio::time::sleep(self.poll_delay).await;
        }
        let mut state = self.inner.lock();
        let records: Vec<ExecutionRecord> = state.pending_records.drain(..).collect();
        state.observed += records.len() as u64;
        if let Some(last) = records.iter().map(|r| r.timestamp_ms).max() {
            state.last_execution_ms = Some(state.last_execution_ms.map_or(last, |prev| prev.max(last)));
        }
        PollOutcome { records, errors: state.pending_errors.drain(..).collect() }
    }

    fn summary(&self) -> ProviderSummary {
        let state = self.inner.lock();
        ProviderSummary {
            provider: self.id.clone(),
            total_jobs: state.jobs.len(),
            active_jobs: state.active.len(),
            executions_observed: state.observed,
            last_execution_ms: state.last_execution_ms,
        }
    }
}
