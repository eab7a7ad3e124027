// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static cost and reliability characteristics of each provider kind.

use uk_core::{AutomationJob, Priority, ProviderId};

/// Scoring inputs for provider selection.
pub trait ProviderProfile: Send + Sync + 'static {
    fn id(&self) -> ProviderId;

    /// Relative cost multiplier applied to a job's gas budget
    fn cost_per_gas_unit(&self) -> u64;

    fn base_reliability(&self) -> u32;

    /// Extra points for jobs this provider is particularly suited to
    fn feature_bonus(&self, job: &AutomationJob) -> u32;
}

/// Registry-and-bond network: cheap, reliable, best for scheduled work.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeeperProfile;

impl ProviderProfile for KeeperProfile {
    fn id(&self) -> ProviderId {
        ProviderId::keeper()
    }

    fn cost_per_gas_unit(&self) -> u64 {
        20
    }

    fn base_reliability(&self) -> u32 {
        90
    }

    fn feature_bonus(&self, job: &AutomationJob) -> u32 {
        if job.is_high_frequency() {
            0
        } else {
            20
        }
    }
}

/// Off-chain relay network: pricier, favours frequent and urgent work.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayProfile;

impl ProviderProfile for RelayProfile {
    fn id(&self) -> ProviderId {
        ProviderId::relay()
    }

    fn cost_per_gas_unit(&self) -> u64 {
        25
    }

    fn base_reliability(&self) -> u32 {
        85
    }

    fn feature_bonus(&self, job: &AutomationJob) -> u32 {
        let mut bonus = 0;
        if job.is_high_frequency() {
            bonus += 25;
        }
        if job.priority >= Priority::Medium {
            bonus += 15;
        }
        bonus
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
