// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider selection.
//!
//! ```text
//! score = max(0, 100 - cost_per_gas_unit * gas_limit / 1000)
//!       + base_reliability
//!       + feature_bonus(job)
//! ```
//!
//! The highest score wins. On an exact tie the adapter registered first wins.
//! Jobs that name a provider skip scoring entirely.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uk_adapters::ProviderProfile;
use uk_core::{AutomationJob, ProviderChoice, ProviderId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("no provider available")]
    NoProviderAvailable,
    #[error("provider {0} is not available")]
    ProviderNotAvailable(ProviderId),
}

/// How one provider scored for one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub provider: ProviderId,
    pub estimated_cost: u128,
    pub cost_score: f64,
    pub reliability: u32,
    pub feature_bonus: u32,
    pub total: f64,
}

/// Outcome of [`select`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub provider: ProviderId,
    /// One entry per available provider, in registration order. Empty when
    /// the job named its provider.
    pub scores: Vec<ScoreBreakdown>,
}

impl Selection {
    pub fn is_explicit(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn winner(&self) -> Option<&ScoreBreakdown> {
        self.scores.iter().find(|s| s.provider == self.provider)
    }
}

pub fn score<P: ProviderProfile + ?Sized>(provider: &P, job: &AutomationJob) -> ScoreBreakdown {
    let estimated_cost = provider.cost_per_gas_unit() as u128 * job.gas_limit as u128;
    let cost_score = (100.0 - estimated_cost as f64 / 1000.0).max(0.0);
    let reliability = provider.base_reliability();
    let feature_bonus = provider.feature_bonus(job);
    ScoreBreakdown {
        provider: provider.id(),
        estimated_cost,
        cost_score,
        reliability,
        feature_bonus,
        total: cost_score + reliability as f64 + feature_bonus as f64,
    }
}

/// Pick a provider for `job` from `providers`, in registration order.
pub fn select<P: ProviderProfile + ?Sized>(
    job: &AutomationJob,
    providers: &[Arc<P>],
) -> Result<Selection, SelectError> {
    if providers.is_empty() {
        return Err(SelectError::NoProviderAvailable);
    }

    if let ProviderChoice::Explicit(id) = &job.provider {
        return if providers.iter().any(|p| p.id() == *id) {
            Ok(Selection { provider: id.clone(), scores: Vec::new() })
        } else {
            Err(SelectError::ProviderNotAvailable(id.clone()))
        };
    }

    let scores: Vec<ScoreBreakdown> = providers.iter().map(|p| score(p.as_ref(), job)).collect();
    let best = scores
        .iter()
        .reduce(|best, candidate| if candidate.total > best.total { candidate } else { best })
        .ok_or(SelectError::NoProviderAvailable)?;
    let provider = best.provider.clone();
    tracing::info!(
        job = %job.name,
        provider = %provider,
        total = best.total,
        cost_score = best.cost_score,
        reliability = best.reliability,
        feature_bonus = best.feature_bonus,
        "provider selected"
    );
    Ok(Selection { provider, scores })
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
