// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::id::ProviderId;
use crate::job::{AutomationJob, Priority, ProviderChoice};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::job::{AutomationJob, Priority};
    use proptest::prelude::*;

    pub fn arb_priority() -> impl Strategy<Value = Priority> {
        prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
    }

    /// Valid auto-assigned jobs with realistic gas and frequency ranges.
    pub fn arb_job() -> impl Strategy<Value = AutomationJob> {
        ("[a-z]{1,12}", 1u64..2_000_000, 1u64..172_800, arb_priority()).prop_map(
            |(name, gas, freq, priority)| {
                AutomationJob::new(name, "0x00000000000000000000000000000000000000aa", "run")
                    .gas_limit(gas)
                    .frequency_secs(freq)
                    .priority(priority)
            },
        )
    }
}

// ── Job fixtures ────────────────────────────────────────────────────────

/// The daily vault rebalance used throughout the docs.
pub fn rebalance_job() -> AutomationJob {
    AutomationJob::new("vault_rebalance", "0x00000000000000000000000000000000000000aa", "rebalance")
        .gas_limit(500_000)
        .frequency_secs(86_400)
        .max_fee(100_000_000_000_000_000)
        .priority(Priority::Medium)
}

/// The hourly yield harvest used throughout the docs.
pub fn harvest_job() -> AutomationJob {
    AutomationJob::new("harvest", "0x00000000000000000000000000000000000000bb", "harvestYield")
        .gas_limit(300_000)
        .frequency_secs(3_600)
        .max_fee(50_000_000_000_000_000)
        .priority(Priority::High)
}

/// Same as [`harvest_job`] pinned to one provider.
pub fn pinned_job(name: &str, provider: &str) -> AutomationJob {
    let mut job = harvest_job().provider(ProviderChoice::Explicit(ProviderId::from(provider)));
    job.name = name.to_string();
    job
}
