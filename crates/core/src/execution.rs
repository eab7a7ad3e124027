// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized execution record.
//!
//! Every provider translates its native feed (transaction receipts, relay
//! execution history) into these records before the orchestrator sees them.

use crate::id::ProviderId;
use serde::{Deserialize, Serialize};

/// One observed run of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub job: String,
    pub provider: ProviderId,
    /// When the execution happened (epoch ms). Distinct per job.
    pub timestamp_ms: u64,
    pub success: bool,
    pub gas_used: u64,
    /// Fee paid in wei
    pub fee_paid: u128,
    /// Submit-to-confirmation latency, when the provider can measure it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionRecord {
    pub fn new(job: impl Into<String>, provider: ProviderId, timestamp_ms: u64) -> Self {
        Self {
            job: job.into(),
            provider,
            timestamp_ms,
            success: true,
            gas_used: 0,
            fee_paid: 0,
            latency_ms: None,
            error: None,
        }
    }

    crate::setters! {
        set {
            success: bool,
            gas_used: u64,
            fee_paid: u128,
        }
        option {
            latency_ms: u64,
            error: String,
        }
    }
}
