// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Automation job definition and lifecycle.

use crate::id::ProviderId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frequencies at or above this many seconds count as "scheduled" work.
pub const HOURLY_SECS: u64 = 3600;

/// Job priority. Ordered so `priority >= Priority::Medium` reads naturally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

crate::simple_display! {
    Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

/// Which provider the caller asked for.
///
/// Serialized as the provider name, or `"auto"` to let the selector decide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderChoice {
    #[default]
    Auto,
    Explicit(ProviderId),
}

impl From<String> for ProviderChoice {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("auto") || s.is_empty() {
            ProviderChoice::Auto
        } else {
            ProviderChoice::Explicit(ProviderId::from(s))
        }
    }
}

impl From<&str> for ProviderChoice {
    fn from(s: &str) -> Self {
        ProviderChoice::from(s.to_string())
    }
}

impl From<ProviderChoice> for String {
    fn from(choice: ProviderChoice) -> Self {
        match choice {
            ProviderChoice::Auto => "auto".to_string(),
            ProviderChoice::Explicit(id) => id.to_string(),
        }
    }
}

impl From<ProviderId> for ProviderChoice {
    fn from(id: ProviderId) -> Self {
        ProviderChoice::Explicit(id)
    }
}

impl std::fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderChoice::Auto => f.write_str("auto"),
            ProviderChoice::Explicit(id) => write!(f, "{id}"),
        }
    }
}

/// Lifecycle state of a job inside the orchestrator.
///
/// ```text
/// Registered ──deploy──► Deployed ──cancel──► Cancelled
///      └───────────────cancel───────────────────┘
/// ```
///
/// `Expired` is reserved for provider-imposed expiry, which no provider
/// reports yet; nothing transitions into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Registered,
    Deployed,
    Cancelled,
    Expired,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Cancelled | JobStatus::Expired)
    }
}

crate::simple_display! {
    JobStatus {
        Registered => "registered",
        Deployed => "deployed",
        Cancelled => "cancelled",
        Expired => "expired",
    }
}

/// Rejected job definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("job name must not be empty")]
    EmptyName,
    #[error("job {0}: frequency must be greater than zero")]
    ZeroFrequency(String),
    #[error("job {0}: gas limit must be greater than zero")]
    ZeroGasLimit(String),
}

/// A recurring maintenance task targeting one contract function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationJob {
    /// Unique key within the orchestrator
    pub name: String,
    /// Contract the job calls
    pub target: String,
    /// Function invoked on execution (e.g. `harvestYield`)
    pub function: String,
    /// Opaque payload passed to the trigger check
    #[serde(with = "crate::hex_bytes", default)]
    pub check_data: Vec<u8>,
    /// Gas budget per execution
    pub gas_limit: u64,
    /// Minimum seconds between executions
    pub frequency_secs: u64,
    /// Maximum fee (wei) the caller pays per execution
    #[serde(default, with = "crate::decimal")]
    pub max_fee: u128,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub provider: ProviderChoice,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at_ms: Option<u64>,
    #[serde(default)]
    pub last_execution_ms: Option<u64>,
}

fn default_active() -> bool {
    true
}

impl AutomationJob {
    /// Create an active job with an hourly frequency and automatic provider
    /// selection. Gas limit starts at 0 and must be set before validation.
    pub fn new(
        name: impl Into<String>,
        target: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            function: function.into(),
            check_data: Vec::new(),
            gas_limit: 0,
            frequency_secs: HOURLY_SECS,
            max_fee: 0,
            priority: Priority::Low,
            provider: ProviderChoice::Auto,
            active: true,
            created_at_ms: None,
            last_execution_ms: None,
        }
    }

    crate::setters! {
        into {
            provider: ProviderChoice,
        }
        set {
            check_data: Vec<u8>,
            gas_limit: u64,
            frequency_secs: u64,
            max_fee: u128,
            priority: Priority,
        }
    }

    /// Check the invariants every registered job must hold.
    pub fn validate(&self) -> Result<(), JobError> {
        if self.name.trim().is_empty() {
            return Err(JobError::EmptyName);
        }
        if self.frequency_secs == 0 {
            return Err(JobError::ZeroFrequency(self.name.clone()));
        }
        if self.gas_limit == 0 {
            return Err(JobError::ZeroGasLimit(self.name.clone()));
        }
        Ok(())
    }

    /// Runs at least once an hour.
    pub fn is_high_frequency(&self) -> bool {
        self.frequency_secs < HOURLY_SECS
    }

    /// Signature used as the execution selector, e.g. `harvestYield()`.
    pub fn function_signature(&self) -> String {
        if self.function.contains('(') {
            self.function.clone()
        } else {
            format!("{}()", self.function)
        }
    }

    /// Whether `frequency_secs` has elapsed since the last execution at `now_ms`.
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_execution_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.frequency_secs.saturating_mul(1000),
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
