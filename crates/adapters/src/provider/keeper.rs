// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry-style provider ("keeper").
//!
//! Jobs are registered as upkeeps on an on-chain registry, bonded with the
//! funding token. The adapter itself plays the executor: each poll calls the
//! target's `checkUpkeep` and, when it reports work, sends `performUpkeep`
//! with the returned payload.

use super::{
    KeeperProfile, PollError, PollOutcome, ProviderAdapter, ProviderError, ProviderProfile,
    ProviderSummary,
};
use crate::chain::{CallValue, ChainClient, Transaction, TxReceipt};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use uk_core::{AutomationJob, Clock, ExecutionRecord, ProviderId, RegistrationId, SystemClock};

/// Event the registry emits with the new upkeep id as its first integer.
pub const UPKEEP_REGISTERED_EVENT: &str = "UpkeepRegistered";

/// 5 tokens at 18 decimals
pub const DEFAULT_BOND: u128 = 5_000_000_000_000_000_000;

/// Registry addresses and gas settings.
#[derive(Debug, Clone)]
pub struct KeeperConfig {
    pub registry: String,
    pub funding_token: String,
    /// Funding amount locked at registration
    pub bond: u128,
    pub approve_gas: u64,
    pub register_gas: u64,
    /// Gas for cancel, fund, pause and unpause
    pub admin_gas: u64,
    pub poll_interval: Duration,
    /// Registration source tag passed through to the registry
    pub source: u8,
    pub metadata: Vec<u8>,
}

impl KeeperConfig {
    pub fn new(registry: impl Into<String>, funding_token: impl Into<String>) -> Self {
        Self {
            registry: registry.into(),
            funding_token: funding_token.into(),
            bond: DEFAULT_BOND,
            approve_gas: 100_000,
            register_gas: 500_000,
            admin_gas: 200_000,
            poll_interval: Duration::from_secs(60),
            source: 0,
            metadata: Vec::new(),
        }
    }

    uk_core::setters! {
        set {
            bond: u128,
            approve_gas: u64,
            register_gas: u64,
            admin_gas: u64,
            poll_interval: Duration,
            source: u8,
            metadata: Vec<u8>,
        }
    }
}

/// Local bookkeeping for one registered upkeep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpkeepRecord {
    pub job: AutomationJob,
    /// Bond plus top-ups minus fees spent by this executor
    pub balance: u128,
    pub amount_spent: u128,
    pub paused: bool,
    pub cancelled: bool,
    pub executions: u64,
    pub last_performed_block: Option<u64>,
}

/// Upkeep as the registry reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpkeepInfo {
    pub target: String,
    pub execute_gas: u64,
    #[serde(with = "uk_core::hex_bytes")]
    pub check_data: Vec<u8>,
    pub balance: u128,
    pub last_keeper: String,
    pub admin: String,
    pub max_valid_blocknumber: u128,
    pub amount_spent: u128,
}

/// Keeper adapter over any [`ChainClient`].
#[derive(Clone)]
pub struct KeeperAdapter<C, K = SystemClock> {
    chain: C,
    config: KeeperConfig,
    clock: K,
    upkeeps: Arc<Mutex<IndexMap<RegistrationId, UpkeepRecord>>>,
}

impl<C: ChainClient> KeeperAdapter<C> {
    pub fn new(chain: C, config: KeeperConfig) -> Self {
        Self::with_clock(chain, config, SystemClock)
    }
}

impl<C: ChainClient, K: Clock> KeeperAdapter<C, K> {
    pub fn with_clock(chain: C, config: KeeperConfig, clock: K) -> Self {
        Self { chain, config, clock, upkeeps: Arc::new(Mutex::new(IndexMap::new())) }
    }

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    /// Local record for an upkeep this adapter registered.
    pub fn upkeep(&self, id: &RegistrationId) -> Option<UpkeepRecord> {
        self.upkeeps.lock().get(id).cloned()
    }

    /// Bond the job and register it as an upkeep.
    ///
    /// Checks the funding balance, approves the registry for the bond, then
    /// registers. The upkeep id comes from the registration receipt.
    pub async fn register(&self, job: &AutomationJob) -> Result<RegistrationId, ProviderError> {
        let span = tracing::info_span!("keeper.register", job = %job.name);
        async move {
            let account = self.chain.account().to_string();
            let balance = self
                .chain
                .call(
                    &self.config.funding_token,
                    "balanceOf",
                    vec![CallValue::Address(account.clone())],
                )
                .await?;
            let balance = balance.as_uint().ok_or_else(|| decode("balanceOf", "expected uint"))?;
            if balance < self.config.bond {
                return Err(ProviderError::InsufficientFunds { need: self.config.bond, have: balance });
            }

            let approve = Transaction::call(
                self.config.funding_token.clone(),
                "approve",
                vec![CallValue::Address(self.config.registry.clone()), CallValue::Uint(self.config.bond)],
            )
            .gas_limit(self.config.approve_gas);
            self.send("approve", approve).await?;

            let register = Transaction::call(
                self.config.registry.clone(),
                "registerUpkeep",
                vec![
                    CallValue::String(job.name.clone()),
                    CallValue::Bytes(self.config.metadata.clone()),
                    CallValue::Address(job.target.clone()),
                    CallValue::Uint(job.gas_limit as u128),
                    CallValue::Address(account),
                    CallValue::Bytes(job.check_data.clone()),
                    CallValue::Uint(self.config.bond),
                    CallValue::Uint(self.config.source as u128),
                ],
            )
            .gas_limit(self.config.register_gas);
            let receipt = self.send("registerUpkeep", register).await?;

            let upkeep_id = receipt
                .event(UPKEEP_REGISTERED_EVENT)
                .and_then(|log| log.values.iter().find_map(CallValue::as_uint))
                .ok_or_else(|| ProviderError::MissingRegistrationId(job.name.clone()))?;
            let id = RegistrationId::new(upkeep_id.to_string());

            self.upkeeps.lock().insert(
                id.clone(),
                UpkeepRecord {
                    job: job.clone(),
                    balance: self.config.bond,
                    amount_spent: 0,
                    paused: false,
                    cancelled: false,
                    executions: 0,
                    last_performed_block: None,
                },
            );
            tracing::info!(upkeep_id = %id, tx = %receipt.hash, "upkeep registered");
            Ok(id)
        }
        .instrument(span)
        .await
    }

    /// Run one check-and-perform cycle for an upkeep.
    ///
    /// Returns `None` when the upkeep is paused, cancelled, not yet due, or
    /// the target reports no work.
    pub async fn poll_and_execute(
        &self,
        id: &RegistrationId,
    ) -> Result<Option<ExecutionRecord>, ProviderError> {
        let job = {
            let upkeeps = self.upkeeps.lock();
            let upkeep = upkeeps
                .get(id)
                .ok_or_else(|| ProviderError::UnknownRegistration(id.to_string()))?;
            if upkeep.paused || upkeep.cancelled {
                return Ok(None);
            }
            upkeep.job.clone()
        };
        if !job.is_due(self.clock.epoch_ms()) {
            return Ok(None);
        }

        let check = self
            .chain
            .call(&job.target, "checkUpkeep", vec![CallValue::Bytes(job.check_data.clone())])
            .await?;
        let (needed, perform_data) = match check.as_tuple() {
            Some([needed, data]) => (
                needed.as_bool().ok_or_else(|| decode("checkUpkeep", "expected bool"))?,
                data.as_bytes().ok_or_else(|| decode("checkUpkeep", "expected bytes"))?.to_vec(),
            ),
            _ => return Err(decode("checkUpkeep", "expected (bool, bytes)")),
        };
        if !needed {
            tracing::debug!(job = %job.name, "upkeep not needed");
            return Ok(None);
        }

        let started = self.clock.epoch_ms();
        let perform =
            Transaction::call(job.target.clone(), "performUpkeep", vec![CallValue::Bytes(perform_data)])
                .gas_limit(job.gas_limit);
        let receipt = self.chain.sign_and_send(perform).await?;
        let finished = self.clock.epoch_ms();
        // Timestamps must be strictly increasing per job.
        let timestamp = match job.last_execution_ms {
            Some(last) => finished.max(last + 1),
            None => finished,
        };

        let mut record = ExecutionRecord::new(job.name.clone(), ProviderId::keeper(), timestamp)
            .success(receipt.success)
            .gas_used(receipt.gas_used)
            .fee_paid(receipt.fee_paid)
            .latency_ms(finished.saturating_sub(started));
        if !receipt.success {
            record = record.error(format!("performUpkeep reverted in {}", receipt.hash));
        }

        if let Some(upkeep) = self.upkeeps.lock().get_mut(id) {
            upkeep.job.last_execution_ms = Some(timestamp);
            upkeep.executions += 1;
            upkeep.last_performed_block = Some(receipt.block);
            upkeep.amount_spent = upkeep.amount_spent.saturating_add(receipt.fee_paid);
            upkeep.balance = upkeep.balance.saturating_sub(receipt.fee_paid);
        }
        tracing::info!(
            job = %job.name,
            success = receipt.success,
            gas_used = receipt.gas_used,
            tx = %receipt.hash,
            "upkeep performed"
        );
        Ok(Some(record))
    }

    /// Cancel an upkeep. A second cancel sends nothing.
    pub async fn cancel_upkeep(&self, id: &RegistrationId) -> Result<(), ProviderError> {
        if self.upkeeps.lock().get(id).is_some_and(|u| u.cancelled) {
            return Ok(());
        }
        let upkeep_id = parse_upkeep_id(id)?;
        let span = tracing::info_span!("keeper.cancel", upkeep_id = %id);
        async move {
            let tx = Transaction::call(
                self.config.registry.clone(),
                "cancelUpkeep",
                vec![CallValue::Uint(upkeep_id)],
            )
            .gas_limit(self.config.admin_gas);
            self.send("cancelUpkeep", tx).await?;
            if let Some(upkeep) = self.upkeeps.lock().get_mut(id) {
                upkeep.cancelled = true;
            }
            tracing::info!("upkeep cancelled");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Top up an upkeep's balance.
    pub async fn fund(&self, id: &RegistrationId, amount: u128) -> Result<(), ProviderError> {
        let upkeep_id = parse_upkeep_id(id)?;
        let approve = Transaction::call(
            self.config.funding_token.clone(),
            "approve",
            vec![CallValue::Address(self.config.registry.clone()), CallValue::Uint(amount)],
        )
        .gas_limit(self.config.approve_gas);
        self.send("approve", approve).await?;

        let add = Transaction::call(
            self.config.registry.clone(),
            "addFunds",
            vec![CallValue::Uint(upkeep_id), CallValue::Uint(amount)],
        )
        .gas_limit(self.config.admin_gas);
        self.send("addFunds", add).await?;

        if let Some(upkeep) = self.upkeeps.lock().get_mut(id) {
            upkeep.balance = upkeep.balance.saturating_add(amount);
        }
        tracing::info!(upkeep_id = %id, amount = %amount, "upkeep funded");
        Ok(())
    }

    /// Suspend an upkeep. Paused upkeeps are skipped by [`Self::poll_and_execute`].
    pub async fn pause(&self, id: &RegistrationId) -> Result<(), ProviderError> {
        self.set_paused(id, true).await
    }

    pub async fn unpause(&self, id: &RegistrationId) -> Result<(), ProviderError> {
        self.set_paused(id, false).await
    }

    async fn set_paused(&self, id: &RegistrationId, paused: bool) -> Result<(), ProviderError> {
        let upkeep_id = parse_upkeep_id(id)?;
        let function = if paused { "pauseUpkeep" } else { "unpauseUpkeep" };
        let tx = Transaction::call(self.config.registry.clone(), function, vec![CallValue::Uint(upkeep_id)])
            .gas_limit(self.config.admin_gas);
        self.send(function, tx).await?;
        if let Some(upkeep) = self.upkeeps.lock().get_mut(id) {
            upkeep.paused = paused;
        }
        tracing::info!(upkeep_id = %id, paused, "upkeep pause state changed");
        Ok(())
    }

    /// Read the registry's view of an upkeep.
    pub async fn get_upkeep(&self, id: &RegistrationId) -> Result<UpkeepInfo, ProviderError> {
        let upkeep_id = parse_upkeep_id(id)?;
        let value = self
            .chain
            .call(&self.config.registry, "getUpkeep", vec![CallValue::Uint(upkeep_id)])
            .await?;
        let fields = value.as_tuple().ok_or_else(|| decode("getUpkeep", "expected tuple"))?;
        let [target, execute_gas, check_data, balance, last_keeper, admin, max_valid, spent] = fields
        else {
            return Err(decode("getUpkeep", &format!("expected 8 fields, got {}", fields.len())));
        };
        let uint = |v: &CallValue| v.as_uint().ok_or_else(|| decode("getUpkeep", "expected uint"));
        let address =
            |v: &CallValue| v.as_address().map(str::to_string).ok_or_else(|| decode("getUpkeep", "expected address"));
        Ok(UpkeepInfo {
            target: address(target)?,
            execute_gas: u64::try_from(uint(execute_gas)?)
                .map_err(|_| decode("getUpkeep", "execute gas out of range"))?,
            check_data: check_data
                .as_bytes()
                .ok_or_else(|| decode("getUpkeep", "expected bytes"))?
                .to_vec(),
            balance: uint(balance)?,
            last_keeper: address(last_keeper)?,
            admin: address(admin)?,
            max_valid_blocknumber: uint(max_valid)?,
            amount_spent: uint(spent)?,
        })
    }

    /// Send a transaction and treat a revert as an error.
    async fn send(&self, step: &'static str, tx: Transaction) -> Result<TxReceipt, ProviderError> {
        let receipt = self.chain.sign_and_send(tx).await?;
        if !receipt.success {
            return Err(ProviderError::Reverted { step, hash: receipt.hash });
        }
        Ok(receipt)
    }
}

fn parse_upkeep_id(id: &RegistrationId) -> Result<u128, ProviderError> {
    id.as_str().parse().map_err(|_| ProviderError::InvalidRegistration(id.to_string()))
}

fn decode(function: &str, detail: &str) -> ProviderError {
    ProviderError::Decode { function: function.to_string(), detail: detail.to_string() }
}

impl<C: ChainClient, K: Clock> ProviderProfile for KeeperAdapter<C, K> {
    fn id(&self) -> ProviderId {
        KeeperProfile.id()
    }

    fn cost_per_gas_unit(&self) -> u64 {
        KeeperProfile.cost_per_gas_unit()
    }

    fn base_reliability(&self) -> u32 {
        KeeperProfile.base_reliability()
    }

    fn feature_bonus(&self, job: &AutomationJob) -> u32 {
        KeeperProfile.feature_bonus(job)
    }
}

#[async_trait]
impl<C: ChainClient, K: Clock> ProviderAdapter for KeeperAdapter<C, K> {
    fn poll_interval(&self) -> Duration {
        self.config.poll_interval
    }

    async fn deploy(&self, job: &AutomationJob) -> Result<RegistrationId, ProviderError> {
        self.register(job).await
    }

    async fn cancel(&self, job: &str, registration: &RegistrationId) -> Result<(), ProviderError> {
        tracing::debug!(job, "cancelling upkeep");
        self.cancel_upkeep(registration).await
    }

    async fn poll(&self) -> PollOutcome {
        let ids: Vec<(RegistrationId, String)> = self
            .upkeeps
            .lock()
            .iter()
            .filter(|(_, u)| !u.cancelled)
            .map(|(id, u)| (id.clone(), u.job.name.clone()))
            .collect();

        let mut outcome = PollOutcome::default();
        for (id, job) in ids {
            match self.poll_and_execute(&id).await {
                Ok(Some(record)) => outcome.records.push(record),
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(job = %job, upkeep_id = %id, error = %error, "upkeep poll failed");
                    outcome.errors.push(PollError { job, error });
                }
            }
        }
        outcome
    }

    fn summary(&self) -> ProviderSummary {
        let upkeeps = self.upkeeps.lock();
        ProviderSummary {
            provider: ProviderId::keeper(),
            total_jobs: upkeeps.len(),
            active_jobs: upkeeps.values().filter(|u| !u.cancelled).count(),
            executions_observed: upkeeps.values().map(|u| u.executions).sum(),
            last_execution_ms: upkeeps.values().filter_map(|u| u.job.last_execution_ms).max(),
        }
    }
}

#[cfg(test)]
#[path = "keeper_tests.rs"]
mod tests;
