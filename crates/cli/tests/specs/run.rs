// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk run` startup failures.

use crate::prelude::*;

#[test]
fn run_without_providers_exits_two() {
    let project = Project::with_config(&format!("{CHAIN}{}", job("idle", 1_000, 60, "low")));

    project.uk().args(&["run"]).exits_with(2).stderr_has("no providers enabled");
}

#[test]
fn run_rejects_invalid_jobs_before_deploying() {
    let project = Project::with_config(&format!("{CHAIN}{KEEPER}{}", job("broken", 0, 60, "low")));

    project.uk().args(&["run"]).exits_with(2).stderr_has("gas limit must be greater than zero");
}

#[test]
fn run_fails_when_nothing_deploys() {
    let project = Project::with_config(&format!("{CHAIN}{KEEPER}{}", job("harvest", 300_000, 3_600, "high")));

    project.uk().args(&["run"]).exits_with(1).stderr_has("no jobs were deployed");
}
