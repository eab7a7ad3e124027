// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Automation provider adapters
//!
//! Each automation network is wrapped by one [`ProviderAdapter`]. The
//! orchestrator only ever sees this trait: it deploys jobs, cancels them, and
//! polls for normalized [`ExecutionRecord`]s. Provider-native records (keeper
//! upkeeps, relay tasks) stay private to the adapter that owns them.
//!
//! Scoring constants live on the [`ProviderProfile`] supertrait so the
//! selector can rank providers without any network access.

pub mod keeper;
pub mod relay;

mod profile;

pub use profile::{KeeperProfile, ProviderProfile, RelayProfile};

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProviderAdapter, ProviderCall};

use crate::chain::ChainError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use uk_core::{AutomationJob, ExecutionRecord, ProviderId, RegistrationId};

/// Errors from provider operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("insufficient funds: need {need}, have {have}")]
    InsufficientFunds { need: u128, have: u128 },
    #[error("relay request failed (HTTP {status}): {body}")]
    RelayRequestFailed { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error("{step} transaction {hash} reverted")]
    Reverted { step: &'static str, hash: String },
    #[error("unexpected result from {function}: {detail}")]
    Decode { function: String, detail: String },
    #[error("receipt for {0} carried no registration id")]
    MissingRegistrationId(String),
    #[error("invalid registration id: {0}")]
    InvalidRegistration(String),
    #[error("unknown registration: {0}")]
    UnknownRegistration(String),
}

/// A per-job failure swallowed during a poll cycle.
#[derive(Debug, Clone)]
pub struct PollError {
    pub job: String,
    pub error: ProviderError,
}

/// Result of one poll cycle across every job an adapter manages.
#[derive(Debug, Clone, Default)]
pub struct PollOutcome {
    /// New executions only; never repeats a record from an earlier cycle
    pub records: Vec<ExecutionRecord>,
    pub errors: Vec<PollError>,
}

/// Point-in-time view of the jobs an adapter manages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSummary {
    pub provider: ProviderId,
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub executions_observed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_execution_ms: Option<u64>,
}

/// Adapter for one automation network.
#[async_trait]
pub trait ProviderAdapter: ProviderProfile {
    /// How often the monitor polls this adapter.
    fn poll_interval(&self) -> Duration;

    /// Register the job with the network and return the native handle.
    async fn deploy(&self, job: &AutomationJob) -> Result<RegistrationId, ProviderError>;

    /// Cancel a deployed job. Cancelling twice is not an error.
    async fn cancel(&self, job: &str, registration: &RegistrationId) -> Result<(), ProviderError>;

    /// Check every active job once and return newly observed executions.
    ///
    /// Per-job failures are logged and reported in [`PollOutcome::errors`];
    /// they never abort the cycle.
    async fn poll(&self) -> PollOutcome;

    fn summary(&self) -> ProviderSummary;
}
