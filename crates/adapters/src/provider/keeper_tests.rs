// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::chain::FakeChain;
use uk_core::test_support::{harvest_job, rebalance_job};
use uk_core::FakeClock;

const REGISTRY: &str = "0x00000000000000000000000000000000000000r1";
const TOKEN: &str = "0x00000000000000000000000000000000000000t1";
const TEN_TOKENS: u128 = 10_000_000_000_000_000_000;

fn adapter(chain: &FakeChain, clock: &FakeClock) -> KeeperAdapter<FakeChain, FakeClock> {
    KeeperAdapter::with_clock(chain.clone(), KeeperConfig::new(REGISTRY, TOKEN), clock.clone())
}

fn script_registration(chain: &FakeChain, upkeep_id: u128) {
    chain.set_call(TOKEN, "balanceOf", CallValue::Uint(TEN_TOKENS));
    chain.push_receipt(FakeChain::receipt_with_event("Approval", vec![]));
    chain.push_receipt(FakeChain::receipt_with_event(
        UPKEEP_REGISTERED_EVENT,
        vec![CallValue::Uint(upkeep_id)],
    ));
}

async fn registered(
    chain: &FakeChain,
    clock: &FakeClock,
    job: &AutomationJob,
) -> (KeeperAdapter<FakeChain, FakeClock>, RegistrationId) {
    script_registration(chain, 42);
    let keeper = adapter(chain, clock);
    let id = keeper.register(job).await.unwrap();
    (keeper, id)
}

fn check_returns(chain: &FakeChain, job: &AutomationJob, needed: bool, data: Vec<u8>) {
    chain.set_call(
        &job.target,
        "checkUpkeep",
        CallValue::Tuple(vec![CallValue::Bool(needed), CallValue::Bytes(data)]),
    );
}

#[tokio::test]
async fn register_approves_bond_then_registers() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let job = rebalance_job();

    let (keeper, id) = registered(&chain, &clock, &job).await;

    assert_eq!(id, "42");
    assert_eq!(chain.sent_functions(), vec!["approve", "registerUpkeep"]);
    let sent = chain.sent();
    assert_eq!(sent[0].to, TOKEN);
    assert_eq!(sent[0].gas_limit, 100_000);
    assert_eq!(sent[0].args[1], CallValue::Uint(DEFAULT_BOND));
    assert_eq!(sent[1].to, REGISTRY);
    assert_eq!(sent[1].gas_limit, 500_000);
    assert_eq!(sent[1].args[0], CallValue::String("vault_rebalance".to_string()));
    assert_eq!(sent[1].args[2], CallValue::Address(job.target.clone()));
    assert_eq!(sent[1].args[3], CallValue::Uint(500_000));
    assert_eq!(sent[1].args[4], CallValue::Address(chain.account().to_string()));
    assert_eq!(sent[1].args[6], CallValue::Uint(DEFAULT_BOND));

    let record = keeper.upkeep(&id).unwrap();
    assert_eq!(record.balance, DEFAULT_BOND);
    assert!(!record.cancelled);
}

#[tokio::test]
async fn register_rejects_insufficient_funds_before_sending() {
    let chain = FakeChain::new();
    chain.set_call(TOKEN, "balanceOf", CallValue::Uint(1));
    let keeper = adapter(&chain, &FakeClock::new());

    let err = keeper.register(&rebalance_job()).await.unwrap_err();

    assert_eq!(err, ProviderError::InsufficientFunds { need: DEFAULT_BOND, have: 1 });
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn register_stops_when_approve_reverts() {
    let chain = FakeChain::new();
    chain.set_call(TOKEN, "balanceOf", CallValue::Uint(TEN_TOKENS));
    chain.push_receipt(FakeChain::reverted_receipt(40_000));
    let keeper = adapter(&chain, &FakeClock::new());

    let err = keeper.register(&rebalance_job()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Reverted { step: "approve", .. }));
    assert_eq!(chain.sent_functions(), vec!["approve"]);
}

#[tokio::test]
async fn register_requires_id_in_receipt() {
    let chain = FakeChain::new();
    chain.set_call(TOKEN, "balanceOf", CallValue::Uint(TEN_TOKENS));
    let keeper = adapter(&chain, &FakeClock::new());

    let err = keeper.register(&rebalance_job()).await.unwrap_err();

    assert_eq!(err, ProviderError::MissingRegistrationId("vault_rebalance".to_string()));
}

#[tokio::test]
async fn poll_performs_when_check_reports_work() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let job = harvest_job();
    let (keeper, _) = registered(&chain, &clock, &job).await;
    check_returns(&chain, &job, true, vec![0xab, 0xcd]);

    let outcome = keeper.poll().await;

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.job, "harvest");
    assert_eq!(record.provider, ProviderId::keeper());
    assert!(record.success);
    assert_eq!(record.gas_used, 150_000);
    assert_eq!(record.timestamp_ms, clock.epoch_ms());

    let perform = chain.sent().pop().unwrap();
    assert_eq!(perform.function, "performUpkeep");
    assert_eq!(perform.to, job.target);
    assert_eq!(perform.gas_limit, 300_000);
    assert_eq!(perform.args, vec![CallValue::Bytes(vec![0xab, 0xcd])]);
}

#[tokio::test]
async fn poll_waits_for_frequency_to_elapse() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let job = harvest_job();
    let (keeper, _) = registered(&chain, &clock, &job).await;
    check_returns(&chain, &job, true, vec![]);

    let first = keeper.poll().await;
    clock.advance(Duration::from_secs(1800));
    let early = keeper.poll().await;
    clock.advance(Duration::from_secs(1800));
    let due = keeper.poll().await;

    assert_eq!(first.records.len(), 1);
    assert!(early.records.is_empty());
    assert_eq!(due.records.len(), 1);
    assert!(due.records[0].timestamp_ms > first.records[0].timestamp_ms);
    let checks = chain.calls().iter().filter(|c| c.function == "checkUpkeep").count();
    assert_eq!(checks, 2);
}

#[tokio::test]
async fn poll_skips_when_check_reports_no_work() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let job = harvest_job();
    let (keeper, _) = registered(&chain, &clock, &job).await;
    check_returns(&chain, &job, false, vec![]);

    let outcome = keeper.poll().await;

    assert!(outcome.records.is_empty());
    assert!(outcome.errors.is_empty());
    assert_eq!(chain.sent_functions(), vec!["approve", "registerUpkeep"]);
}

#[tokio::test]
async fn reverted_perform_is_a_failed_execution() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let job = harvest_job();
    let (keeper, id) = registered(&chain, &clock, &job).await;
    check_returns(&chain, &job, true, vec![]);
    chain.push_receipt(FakeChain::reverted_receipt(90_000));

    let outcome = keeper.poll().await;

    let record = &outcome.records[0];
    assert!(!record.success);
    assert_eq!(record.gas_used, 90_000);
    assert!(record.error.as_deref().unwrap().contains("performUpkeep reverted"));
    assert_eq!(keeper.upkeep(&id).unwrap().executions, 1);
}

#[tokio::test]
async fn check_failure_is_reported_not_raised() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let job = harvest_job();
    let (keeper, _) = registered(&chain, &clock, &job).await;
    chain.fail_call(&job.target, "checkUpkeep", "connection reset");

    let outcome = keeper.poll().await;

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].job, "harvest");
    assert!(matches!(outcome.errors[0].error, ProviderError::Chain(_)));
}

#[tokio::test]
async fn cancel_twice_sends_one_transaction() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let (keeper, id) = registered(&chain, &clock, &rebalance_job()).await;

    keeper.cancel("vault_rebalance", &id).await.unwrap();
    keeper.cancel("vault_rebalance", &id).await.unwrap();

    let cancels: Vec<_> = chain.sent().into_iter().filter(|tx| tx.function == "cancelUpkeep").collect();
    assert_eq!(cancels.len(), 1);
    assert_eq!(cancels[0].args, vec![CallValue::Uint(42)]);
    assert!(keeper.upkeep(&id).unwrap().cancelled);
    assert!(keeper.poll().await.records.is_empty());
}

#[tokio::test]
async fn cancel_rejects_non_numeric_id() {
    let keeper = adapter(&FakeChain::new(), &FakeClock::new());

    let err = keeper.cancel_upkeep(&RegistrationId::new("0xnope")).await.unwrap_err();

    assert_eq!(err, ProviderError::InvalidRegistration("0xnope".to_string()));
}

#[tokio::test]
async fn paused_upkeeps_are_skipped_until_unpaused() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let job = harvest_job();
    let (keeper, id) = registered(&chain, &clock, &job).await;
    check_returns(&chain, &job, true, vec![]);

    keeper.pause(&id).await.unwrap();
    let paused = keeper.poll().await;
    keeper.unpause(&id).await.unwrap();
    let resumed = keeper.poll().await;

    assert!(paused.records.is_empty());
    assert_eq!(resumed.records.len(), 1);
    let functions = chain.sent_functions();
    assert!(functions.contains(&"pauseUpkeep".to_string()));
    assert!(functions.contains(&"unpauseUpkeep".to_string()));
}

#[tokio::test]
async fn fund_approves_and_adds_funds() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let (keeper, id) = registered(&chain, &clock, &rebalance_job()).await;

    keeper.fund(&id, 1_000).await.unwrap();

    let sent = chain.sent();
    let add = sent.last().unwrap();
    assert_eq!(add.function, "addFunds");
    assert_eq!(add.args, vec![CallValue::Uint(42), CallValue::Uint(1_000)]);
    assert_eq!(sent[sent.len() - 2].function, "approve");
    assert_eq!(keeper.upkeep(&id).unwrap().balance, DEFAULT_BOND + 1_000);
}

#[tokio::test]
async fn get_upkeep_decodes_registry_tuple() {
    let chain = FakeChain::new();
    chain.set_call(
        REGISTRY,
        "getUpkeep",
        CallValue::Tuple(vec![
            CallValue::Address("0xtarget".to_string()),
            CallValue::Uint(500_000),
            CallValue::Bytes(vec![1]),
            CallValue::Uint(7),
            CallValue::Address("0xkeeper".to_string()),
            CallValue::Address("0xadmin".to_string()),
            CallValue::Uint(u32::MAX as u128),
            CallValue::Uint(3),
        ]),
    );
    let keeper = adapter(&chain, &FakeClock::new());

    let info = keeper.get_upkeep(&RegistrationId::new("42")).await.unwrap();

    assert_eq!(info.target, "0xtarget");
    assert_eq!(info.execute_gas, 500_000);
    assert_eq!(info.check_data, vec![1]);
    assert_eq!(info.balance, 7);
    assert_eq!(info.admin, "0xadmin");
    assert_eq!(info.amount_spent, 3);
    assert_eq!(chain.calls()[0].args, vec![CallValue::Uint(42)]);
}

#[tokio::test]
async fn get_upkeep_rejects_short_tuple() {
    let chain = FakeChain::new();
    chain.set_call(REGISTRY, "getUpkeep", CallValue::Tuple(vec![CallValue::Uint(1)]));
    let keeper = adapter(&chain, &FakeClock::new());

    let err = keeper.get_upkeep(&RegistrationId::new("1")).await.unwrap_err();

    assert!(matches!(err, ProviderError::Decode { .. }));
}

#[tokio::test]
async fn summary_counts_upkeeps_and_executions() {
    let chain = FakeChain::new();
    let clock = FakeClock::new();
    let job = harvest_job();
    let (keeper, _) = registered(&chain, &clock, &job).await;
    check_returns(&chain, &job, true, vec![]);
    keeper.poll().await;

    let summary = keeper.summary();

    assert_eq!(summary.provider, ProviderId::keeper());
    assert_eq!(summary.total_jobs, 1);
    assert_eq!(summary.active_jobs, 1);
    assert_eq!(summary.executions_observed, 1);
    assert_eq!(summary.last_execution_ms, Some(clock.epoch_ms()));
}

#[test]
fn profile_matches_keeper_constants() {
    let keeper = adapter(&FakeChain::new(), &FakeClock::new());
    assert_eq!(keeper.id(), "keeper");
    assert_eq!(keeper.cost_per_gas_unit(), 20);
    assert_eq!(keeper.poll_interval(), Duration::from_secs(60));
}
