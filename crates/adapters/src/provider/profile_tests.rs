// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn job(freq: u64, priority: Priority) -> AutomationJob {
    AutomationJob::new("j", "0x1", "run").gas_limit(1).frequency_secs(freq).priority(priority)
}

#[yare::parameterized(
    hourly = { 3600, 20 },
    daily = { 86_400, 20 },
    half_hourly = { 1800, 0 },
)]
fn keeper_rewards_scheduled_jobs(freq: u64, expected: u32) {
    assert_eq!(KeeperProfile.feature_bonus(&job(freq, Priority::High)), expected);
}

#[yare::parameterized(
    frequent_high = { 1800, Priority::High, 40 },
    frequent_low = { 1800, Priority::Low, 25 },
    hourly_medium = { 3600, Priority::Medium, 15 },
    daily_low = { 86_400, Priority::Low, 0 },
)]
fn relay_rewards_frequent_and_urgent_jobs(freq: u64, priority: Priority, expected: u32) {
    assert_eq!(RelayProfile.feature_bonus(&job(freq, priority)), expected);
}

#[test]
fn reference_constants() {
    assert_eq!(KeeperProfile.id(), "keeper");
    assert_eq!(KeeperProfile.cost_per_gas_unit(), 20);
    assert_eq!(KeeperProfile.base_reliability(), 90);
    assert_eq!(RelayProfile.id(), "relay");
    assert_eq!(RelayProfile.cost_per_gas_unit(), 25);
    assert_eq!(RelayProfile.base_reliability(), 85);
}
