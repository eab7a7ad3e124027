// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use uk_adapters::{KeeperProfile, RelayProfile};
use uk_core::test_support::{harvest_job, pinned_job, rebalance_job};

fn both() -> Vec<Arc<dyn ProviderProfile>> {
    vec![Arc::new(KeeperProfile), Arc::new(RelayProfile)]
}

#[test]
fn routes_each_job_in_order() {
    let frequent = harvest_job().frequency_secs(1_800);
    let mut compound = frequent.clone();
    compound.name = "compound".to_string();

    let planned = plan(&[rebalance_job(), compound], &both()).unwrap();

    let routes: Vec<(&str, &str)> =
        planned.iter().map(|p| (p.job.as_str(), p.provider.as_str())).collect();
    assert_eq!(routes, vec![("vault_rebalance", "keeper"), ("compound", "relay")]);
    assert_eq!(planned[0].scores.len(), 2);
    assert_eq!(planned[0].scores[0].total, 110.0);
    assert_eq!(planned[1].scores[1].total, 125.0);
}

#[test]
fn pinned_jobs_carry_no_scores() {
    let planned = plan(&[pinned_job("pinned", "relay")], &both()).unwrap();

    assert!(planned[0].explicit);
    assert!(planned[0].scores.is_empty());
    let json = serde_json::to_value(&planned[0]).unwrap();
    assert!(json.get("scores").is_none());
}

#[test]
fn duplicate_names_fail() {
    let err = plan(&[harvest_job(), harvest_job()], &both()).unwrap_err();
    assert!(matches!(err, PlanError::Duplicate(name) if name == "harvest"));
}

#[test]
fn invalid_jobs_fail() {
    let err = plan(&[harvest_job().frequency_secs(0)], &both()).unwrap_err();
    assert!(matches!(err, PlanError::Invalid(JobError::ZeroFrequency(_))));
}

#[test]
fn pinned_to_disabled_provider_fails() {
    let relay_only: Vec<Arc<dyn ProviderProfile>> = vec![Arc::new(RelayProfile)];

    let err = plan(&[pinned_job("pinned", "keeper")], &relay_only).unwrap_err();

    assert_eq!(err.to_string(), "job pinned: provider keeper is not available");
}
