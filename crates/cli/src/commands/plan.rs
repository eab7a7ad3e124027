// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk plan`: show which provider each job would be routed to.
//!
//! Offline: scoring only needs provider profiles, so no adapter is built.

use crate::color;
use crate::config::Config;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use uk_adapters::ProviderProfile;
use uk_core::{AutomationJob, JobError, ProviderId};
use uk_engine::selector;
use uk_engine::{ScoreBreakdown, SelectError};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Invalid(#[from] JobError),
    #[error("job {0} is defined more than once")]
    Duplicate(String),
    #[error("job {job}: {source}")]
    Selection {
        job: String,
        #[source]
        source: SelectError,
    },
}

/// Routing decision for one job.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedJob {
    pub job: String,
    pub provider: ProviderId,
    pub explicit: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<ScoreBreakdown>,
}

pub fn handle(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let profiles = config.profiles().map_err(ExitError::invalid)?;
    let planned = plan(&config.jobs, &profiles).map_err(ExitError::invalid)?;
    format_or_json(format, &planned, || print_plan(&planned))
}

/// Validate and route every job, in definition order.
pub fn plan(
    jobs: &[AutomationJob],
    profiles: &[Arc<dyn ProviderProfile>],
) -> Result<Vec<PlannedJob>, PlanError> {
    let mut seen = HashSet::new();
    let mut planned = Vec::with_capacity(jobs.len());
    for job in jobs {
        job.validate()?;
        if !seen.insert(job.name.as_str()) {
            return Err(PlanError::Duplicate(job.name.clone()));
        }
        let selection = selector::select(job, profiles)
            .map_err(|source| PlanError::Selection { job: job.name.clone(), source })?;
        planned.push(PlannedJob {
            job: job.name.clone(),
            explicit: selection.is_explicit(),
            provider: selection.provider,
            scores: selection.scores,
        });
    }
    Ok(planned)
}

fn print_plan(planned: &[PlannedJob]) {
    if planned.is_empty() {
        println!("No jobs defined");
        return;
    }
    for entry in planned {
        let how = if entry.explicit { " (explicit)" } else { "" };
        println!("{} -> {}{}", color::header(&entry.job), entry.provider, how);
        for score in &entry.scores {
            println!(
                "  {:<8} {:>6.1}  {}",
                score.provider.as_str(),
                score.total,
                color::muted(&format!(
                    "cost {:.1}, reliability {}, bonus {}",
                    score.cost_score, score.reliability, score.feature_bonus
                ))
            );
        }
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
