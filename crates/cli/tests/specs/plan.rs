// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk plan` routing output.

use crate::prelude::*;

fn both_providers() -> String {
    format!(
        "{CHAIN}{KEEPER}{RELAY}{}{}",
        job("vault_rebalance", 500_000, 86_400, "medium"),
        job("compound", 300_000, 1_800, "high")
    )
}

#[test]
fn routes_jobs_by_score() {
    let project = Project::with_config(&both_providers());

    project
        .uk()
        .args(&["plan"])
        .passes()
        .stdout_has("vault_rebalance -> keeper")
        .stdout_has("compound -> relay")
        .stdout_has("110.0")
        .stdout_has("125.0");
}

#[test]
fn json_output_includes_breakdown() {
    let project = Project::with_config(&both_providers());

    let run = project.uk().args(&["plan", "--format", "json"]).passes();

    let plan = run.json();
    assert_eq!(plan[0]["job"], "vault_rebalance");
    assert_eq!(plan[0]["provider"], "keeper");
    assert_eq!(plan[0]["explicit"], false);
    assert_eq!(plan[0]["scores"][0]["total"], 110.0);
    assert_eq!(plan[1]["provider"], "relay");
}

#[test]
fn pinned_job_is_reported_as_explicit() {
    let config = format!("{CHAIN}{KEEPER}{RELAY}{}provider = \"relay\"\n", job("pinned", 500_000, 86_400, "low"));
    let project = Project::with_config(&config);

    project.uk().args(&["plan"]).passes().stdout_has("pinned -> relay (explicit)");
}

#[test]
fn config_flag_overrides_working_directory() {
    let project = Project::with_config("");
    project.file("custom.toml", &format!("{CHAIN}{KEEPER}{}", job("only", 1_000, 3_600, "low")));
    let custom = project.path().join("custom.toml");

    cli()
        .args(&["plan", "--config", custom.to_str().unwrap()])
        .passes()
        .stdout_has("only -> keeper");
}

#[test]
fn config_from_environment() {
    let project = Project::with_config(&format!("{CHAIN}{KEEPER}{}", job("env", 1_000, 3_600, "low")));
    let path = project.path().join("uk.toml");

    cli().env("UK_CONFIG", path.to_str().unwrap()).args(&["plan"]).passes().stdout_has("env -> keeper");
}

#[test]
fn relay_key_from_environment() {
    let config = format!("{CHAIN}[relay]\nenabled = true\n{}", job("frequent", 1_000, 60, "high"));
    let project = Project::with_config(&config);

    project.uk().env("UK_RELAY_API_KEY", "k").args(&["plan"]).passes().stdout_has("frequent -> relay");
}

#[test]
fn missing_config_exits_two() {
    cli().args(&["plan"]).exits_with(2).stderr_has("no config file found");
}

#[test]
fn no_enabled_provider_exits_two() {
    let project = Project::with_config(&format!("{CHAIN}[keeper]\nenabled = false\n"));

    project.uk().args(&["plan"]).exits_with(2).stderr_has("no providers enabled");
}

#[test]
fn missing_relay_key_exits_two() {
    let project = Project::with_config(&format!("{CHAIN}[relay]\nenabled = true\n"));

    project.uk().args(&["plan"]).exits_with(2).stderr_has("api_key is not set");
}

#[test]
fn duplicate_job_exits_two() {
    let config = format!("{CHAIN}{KEEPER}{}{}", job("twice", 1_000, 60, "low"), job("twice", 1_000, 60, "low"));
    let project = Project::with_config(&config);

    project.uk().args(&["plan"]).exits_with(2).stderr_has("job twice is defined more than once");
}

#[test]
fn zero_gas_exits_two() {
    let project = Project::with_config(&format!("{CHAIN}{KEEPER}{}", job("empty", 0, 60, "low")));

    project.uk().args(&["plan"]).exits_with(2).stderr_has("gas limit must be greater than zero");
}

#[test]
fn malformed_toml_exits_two() {
    let project = Project::with_config("[keeper\nenabled = true\n");

    project.uk().args(&["plan"]).exits_with(2).stderr_has("failed to parse");
}
