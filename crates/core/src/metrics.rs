// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job execution counters.

use crate::execution::ExecutionRecord;
use serde::{Deserialize, Serialize};

/// Rolling counters for one job.
///
/// Counters only grow: [`ExecutionMetrics::apply`] ignores any record that is
/// not strictly newer than the last one folded in, so replaying a provider's
/// history can never double-count or regress a total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    pub total_executions: u64,
    pub successful_executions: u64,
    pub failed_executions: u64,
    pub total_gas_used: u64,
    pub total_fees_paid: u128,
    /// Mean latency over executions that reported one
    pub average_latency_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_execution_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(skip)]
    latency_samples: u64,
}

impl ExecutionMetrics {
    /// Fold one record in. Returns `false` when the record was already seen.
    pub fn apply(&mut self, record: &ExecutionRecord) -> bool {
        if let Some(last) = self.last_execution_ms {
            if record.timestamp_ms <= last {
                return false;
            }
        }

        self.total_executions += 1;
        if record.success {
            self.successful_executions += 1;
        } else {
            self.failed_executions += 1;
            self.last_error = Some(
                record.error.clone().unwrap_or_else(|| "execution reverted".to_string()),
            );
        }
        self.total_gas_used = self.total_gas_used.saturating_add(record.gas_used);
        self.total_fees_paid = self.total_fees_paid.saturating_add(record.fee_paid);
        if let Some(latency) = record.latency_ms {
            self.latency_samples += 1;
            let n = self.latency_samples as f64;
            self.average_latency_ms += (latency as f64 - self.average_latency_ms) / n;
        }
        self.last_execution_ms = Some(record.timestamp_ms);
        true
    }

    /// Fraction of executions that succeeded; 0 when nothing has run.
    pub fn success_rate(&self) -> f64 {
        ratio(self.successful_executions, self.total_executions)
    }

    /// Mean gas per execution; 0 when nothing has run.
    pub fn gas_per_execution(&self) -> f64 {
        ratio(self.total_gas_used, self.total_executions)
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
