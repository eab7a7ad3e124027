// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Relay-style provider ("relay").
//!
//! Jobs become tasks on the relay network's ops contract. The network's
//! executors run them; this adapter only creates and cancels tasks on-chain
//! and reads each task's execution history over HTTP.
//!
//! History is diffed against the newest timestamp already reported for the
//! task, so every execution is emitted exactly once.

use super::{
    PollError, PollOutcome, ProviderAdapter, ProviderError, ProviderProfile, ProviderSummary,
    RelayProfile,
};
use crate::chain::{CallValue, ChainClient, Transaction};
use crate::transport::{RelayRequest, RelayTransport, RelayTransportError, TaskStatus};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use uk_core::{hex_bytes, AutomationJob, ExecutionRecord, ProviderId, RegistrationId};

pub const DEFAULT_OPS_ADDRESS: &str = "0xB3f5503f93d5Ef84b06993a1975B9D21B962892F";

/// Pseudo-address meaning "pay in the chain's native token".
pub const NATIVE_FEE_TOKEN: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Event the ops contract emits with the new task id as its first value.
pub const TASK_CREATED_EVENT: &str = "TaskCreated";

/// Ops contract address and gas settings.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub ops: String,
    pub create_gas: u64,
    pub cancel_gas: u64,
    pub fee_token: String,
    /// Gas requested for sponsored relay calls
    pub relay_gas: u64,
    pub poll_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ops: DEFAULT_OPS_ADDRESS.to_string(),
            create_gas: 500_000,
            cancel_gas: 200_000,
            fee_token: NATIVE_FEE_TOKEN.to_string(),
            relay_gas: 500_000,
            poll_interval: Duration::from_secs(30),
        }
    }
}

impl RelayConfig {
    uk_core::setters! {
        into {
            ops: String,
            fee_token: String,
        }
        set {
            create_gas: u64,
            cancel_gas: u64,
            relay_gas: u64,
            poll_interval: Duration,
        }
    }
}

/// Local bookkeeping for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub job: AutomationJob,
    /// Contract whose check decides when the task runs
    pub resolver: String,
    pub interval_secs: u64,
    pub fee_cap: u128,
    pub active: bool,
    /// Newest execution timestamp already reported
    pub last_seen_ms: Option<u64>,
    pub executions: u64,
}

/// Relay adapter over a [`ChainClient`] and a [`RelayTransport`].
#[derive(Clone)]
pub struct RelayAdapter<C, T> {
    chain: C,
    transport: T,
    config: RelayConfig,
    tasks: Arc<Mutex<IndexMap<RegistrationId, TaskRecord>>>,
}

impl<C: ChainClient, T: RelayTransport> RelayAdapter<C, T> {
    pub fn new(chain: C, transport: T, config: RelayConfig) -> Self {
        Self { chain, transport, config, tasks: Arc::new(Mutex::new(IndexMap::new())) }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn task(&self, task_id: &RegistrationId) -> Option<TaskRecord> {
        self.tasks.lock().get(task_id).cloned()
    }

    /// Create a task on the ops contract. The job's target doubles as its
    /// resolver and the check payload is passed as resolver data.
    pub async fn create_task(&self, job: &AutomationJob) -> Result<RegistrationId, ProviderError> {
        let span = tracing::info_span!("relay.create_task", job = %job.name);
        async move {
            let tx = Transaction::call(
                self.config.ops.clone(),
                "createTask",
                vec![
                    CallValue::Address(job.target.clone()),
                    CallValue::Selector(job.function_signature()),
                    CallValue::Address(job.target.clone()),
                    CallValue::Bytes(job.check_data.clone()),
                ],
            )
            .gas_limit(self.config.create_gas);
            let receipt = self.chain.sign_and_send(tx).await?;
            if !receipt.success {
                return Err(ProviderError::Reverted { step: "createTask", hash: receipt.hash });
            }

            let task_id = receipt
                .event(TASK_CREATED_EVENT)
                .and_then(|log| log.values.first())
                .and_then(task_id_from_value)
                .ok_or_else(|| ProviderError::MissingRegistrationId(job.name.clone()))?;

            self.tasks.lock().insert(
                task_id.clone(),
                TaskRecord {
                    job: job.clone(),
                    resolver: job.target.clone(),
                    interval_secs: job.frequency_secs,
                    fee_cap: job.max_fee,
                    active: true,
                    last_seen_ms: None,
                    executions: 0,
                },
            );
            tracing::info!(task_id = %task_id, tx = %receipt.hash, "relay task created");
            Ok(task_id)
        }
        .instrument(span)
        .await
    }

    /// Submit a one-off sponsored call. Returns the relay's task handle.
    pub async fn submit_relay_request(
        &self,
        target: &str,
        payload: &[u8],
        fee_token: Option<&str>,
    ) -> Result<String, ProviderError> {
        let chain_id = self.chain.chain_id().await?;
        let request = RelayRequest {
            chain_id,
            target: target.to_string(),
            data: payload.to_vec(),
            fee_token: fee_token.unwrap_or(self.config.fee_token.as_str()).to_string(),
            gas: self.config.relay_gas,
        };
        let handle = self.transport.relay_call(&request).await.map_err(|e| {
            tracing::warn!(relay_target = target, error = %e, "relay request failed");
            ProviderError::from_transport("relay_call", e)
        })?;
        tracing::info!(relay_target = target, handle = %handle, "relay request submitted");
        Ok(handle)
    }

    pub async fn get_task_status(&self, task_id: &str) -> Result<TaskStatus, ProviderError> {
        self.transport
            .task_status(task_id)
            .await
            .map_err(|e| ProviderError::from_transport("task_status", e))
    }

    /// Cancel a task. A second cancel sends nothing.
    pub async fn cancel_task(&self, task_id: &RegistrationId) -> Result<(), ProviderError> {
        if self.tasks.lock().get(task_id).is_some_and(|t| !t.active) {
            return Ok(());
        }
        let span = tracing::info_span!("relay.cancel_task", task_id = %task_id);
        async move {
            let tx = Transaction::call(
                self.config.ops.clone(),
                "cancelTask",
                vec![task_id_to_value(task_id)],
            )
            .gas_limit(self.config.cancel_gas);
            let receipt = self.chain.sign_and_send(tx).await?;
            if !receipt.success {
                return Err(ProviderError::Reverted { step: "cancelTask", hash: receipt.hash });
            }
            if let Some(task) = self.tasks.lock().get_mut(task_id) {
                task.active = false;
            }
            tracing::info!("relay task cancelled");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Fold a task's history into new records, advancing its cursor.
    fn diff_history(&self, task_id: &RegistrationId, status: TaskStatus) -> Vec<ExecutionRecord> {
        let mut executions = status.executions;
        executions.sort_by_key(|e| e.timestamp_ms);

        let mut tasks = self.tasks.lock();
        let Some(task) = tasks.get_mut(task_id) else {
            return Vec::new();
        };
        let mut records = Vec::new();
        for execution in executions {
            if task.last_seen_ms.is_some_and(|seen| execution.timestamp_ms <= seen) {
                continue;
            }
            task.last_seen_ms = Some(execution.timestamp_ms);
            task.job.last_execution_ms = Some(execution.timestamp_ms);
            task.executions += 1;

            let mut record =
                ExecutionRecord::new(task.job.name.clone(), ProviderId::relay(), execution.timestamp_ms)
                    .success(execution.success)
                    .gas_used(execution.gas_used)
                    .fee_paid(execution.fee_paid);
            if let Some(error) = execution.error {
                record = record.error(error);
            }
            records.push(record);
        }
        records
    }
}

impl ProviderError {
    fn from_transport(function: &str, error: RelayTransportError) -> Self {
        match error {
            RelayTransportError::Status { status, body } => {
                ProviderError::RelayRequestFailed { status, body }
            }
            RelayTransportError::Transport(message) => ProviderError::Transport(message),
            RelayTransportError::Decode(detail) => {
                ProviderError::Decode { function: function.to_string(), detail }
            }
        }
    }
}

/// Task ids are bytes32 on-chain; some deployments report them as strings.
fn task_id_from_value(value: &CallValue) -> Option<RegistrationId> {
    match value {
        CallValue::Bytes(bytes) => Some(RegistrationId::new(hex_bytes::encode(bytes))),
        CallValue::String(s) | CallValue::Address(s) => Some(RegistrationId::new(s.as_str())),
        CallValue::Uint(n) => Some(RegistrationId::new(n.to_string())),
        _ => None,
    }
}

fn task_id_to_value(task_id: &RegistrationId) -> CallValue {
    match task_id.strip_prefix("0x").map(|_| hex_bytes::decode(task_id)) {
        Some(Ok(bytes)) => CallValue::Bytes(bytes),
        _ => CallValue::String(task_id.to_string()),
    }
}

impl<C: ChainClient, T: RelayTransport> ProviderProfile for RelayAdapter<C, T> {
    fn id(&self) -> ProviderId {
        RelayProfile.id()
    }

    fn cost_per_gas_unit(&self) -> u64 {
        RelayProfile.cost_per_gas_unit()
    }

    fn base_reliability(&self) -> u32 {
        RelayProfile.base_reliability()
    }

    fn feature_bonus(&self, job: &AutomationJob) -> u32 {
        RelayProfile.feature_bonus(job)
    }
}

#[async_trait]
impl<C: ChainClient, T: RelayTransport> ProviderAdapter for RelayAdapter<C, T> {
    fn poll_interval(&self) -> Duration {
        self.config.poll_interval
    }

    async fn deploy(&self, job: &AutomationJob) -> Result<RegistrationId, ProviderError> {
        self.create_task(job).await
    }

    async fn cancel(&self, job: &str, registration: &RegistrationId) -> Result<(), ProviderError> {
        tracing::debug!(job, "cancelling relay task");
        self.cancel_task(registration).await
    }

    async fn poll(&self) -> PollOutcome {
        let active: Vec<(RegistrationId, String)> = self
            .tasks
            .lock()
            .iter()
            .filter(|(_, t)| t.active)
            .map(|(id, t)| (id.clone(), t.job.name.clone()))
            .collect();

        let mut outcome = PollOutcome::default();
        for (task_id, job) in active {
            match self.get_task_status(&task_id).await {
                Ok(status) => outcome.records.extend(self.diff_history(&task_id, status)),
                Err(error) => {
                    tracing::warn!(job = %job, task_id = %task_id, error = %error, "task status poll failed");
                    outcome.errors.push(PollError { job, error });
                }
            }
        }
        outcome
    }

    fn summary(&self) -> ProviderSummary {
        let tasks = self.tasks.lock();
        ProviderSummary {
            provider: ProviderId::relay(),
            total_jobs: tasks.len(),
            active_jobs: tasks.values().filter(|t| t.active).count(),
            executions_observed: tasks.values().map(|t| t.executions).sum(),
            last_execution_ms: tasks.values().filter_map(|t| t.last_seen_ms).max(),
        }
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
