// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::id::ProviderId;
use proptest::prelude::*;

fn record(ts: u64) -> ExecutionRecord {
    ExecutionRecord::new("harvest", ProviderId::relay(), ts).gas_used(100).fee_paid(7)
}

#[test]
fn apply_counts_success_and_failure() {
    let mut m = ExecutionMetrics::default();
    assert!(m.apply(&record(1)));
    assert!(m.apply(&record(2).success(false).error("out of gas")));

    assert_eq!(m.total_executions, 2);
    assert_eq!(m.successful_executions, 1);
    assert_eq!(m.failed_executions, 1);
    assert_eq!(m.total_gas_used, 200);
    assert_eq!(m.total_fees_paid, 14);
    assert_eq!(m.last_execution_ms, Some(2));
    assert_eq!(m.last_error.as_deref(), Some("out of gas"));
    assert_eq!(m.success_rate(), 0.5);
}

#[test]
fn apply_ignores_replayed_timestamps() {
    let mut m = ExecutionMetrics::default();
    assert!(m.apply(&record(10)));
    assert!(!m.apply(&record(10)));
    assert!(!m.apply(&record(9)));
    assert_eq!(m.total_executions, 1);
}

#[test]
fn failed_record_without_message_gets_default_error() {
    let mut m = ExecutionMetrics::default();
    m.apply(&record(1).success(false));
    assert_eq!(m.last_error.as_deref(), Some("execution reverted"));
}

#[test]
fn average_latency_only_counts_reported_samples() {
    let mut m = ExecutionMetrics::default();
    m.apply(&record(1).latency_ms(100u64));
    m.apply(&record(2));
    m.apply(&record(3).latency_ms(300u64));
    assert_eq!(m.average_latency_ms, 200.0);
}

#[test]
fn empty_metrics_report_zero_rates() {
    let m = ExecutionMetrics::default();
    assert_eq!(m.success_rate(), 0.0);
    assert_eq!(m.gas_per_execution(), 0.0);
}

proptest! {
    #[test]
    fn totals_never_regress_and_count_distinct_timestamps(
        batches in prop::collection::vec(prop::collection::vec(0u64..50, 0..8), 1..10)
    ) {
        let mut m = ExecutionMetrics::default();
        let mut seen_max: Option<u64> = None;
        let mut distinct = 0u64;
        let mut previous_total = 0u64;

        for mut batch in batches {
            batch.sort_unstable();
            for ts in batch {
                if seen_max.map_or(true, |max| ts > max) {
                    seen_max = Some(ts);
                    distinct += 1;
                }
                m.apply(&record(ts).success(ts % 3 != 0));
            }
            prop_assert!(m.total_executions >= previous_total);
            previous_total = m.total_executions;
        }

        prop_assert_eq!(m.total_executions, distinct);
        prop_assert_eq!(m.successful_executions + m.failed_executions, m.total_executions);
    }
}
