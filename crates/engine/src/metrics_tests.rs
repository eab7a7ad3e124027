// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use uk_core::ProviderId;

fn record(job: &str, ts: u64, success: bool) -> ExecutionRecord {
    ExecutionRecord::new(job, ProviderId::keeper(), ts).success(success).gas_used(100).fee_paid(7)
}

#[test]
fn ensure_starts_at_zero_and_never_resets() {
    let aggregator = MetricsAggregator::new();
    aggregator.ensure("harvest");
    assert_eq!(aggregator.get("harvest"), Some(ExecutionMetrics::default()));

    aggregator.apply(&record("harvest", 1, true));
    aggregator.ensure("harvest");

    assert_eq!(aggregator.get("harvest").unwrap().total_executions, 1);
}

#[test]
fn untracked_jobs_are_ignored() {
    let aggregator = MetricsAggregator::new();

    assert!(!aggregator.apply(&record("ghost", 1, true)));
    assert_eq!(aggregator.get("ghost"), None);
}

#[test]
fn replayed_records_do_not_double_count() {
    let aggregator = MetricsAggregator::new();
    aggregator.ensure("harvest");

    assert!(aggregator.apply(&record("harvest", 10, true)));
    assert!(aggregator.apply(&record("harvest", 20, false)));
    assert!(!aggregator.apply(&record("harvest", 20, false)));
    assert!(!aggregator.apply(&record("harvest", 10, true)));

    let metrics = aggregator.get("harvest").unwrap();
    assert_eq!(metrics.total_executions, 2);
    assert_eq!(metrics.successful_executions, 1);
    assert_eq!(metrics.failed_executions, 1);
    assert_eq!(metrics.total_gas_used, 200);
    assert_eq!(metrics.total_fees_paid, 14);
}

proptest! {
    #[test]
    fn totals_equal_distinct_timestamps(stamps in proptest::collection::vec(1u64..50, 0..40)) {
        let aggregator = MetricsAggregator::new();
        aggregator.ensure("job");
        let mut previous_total = 0;
        let mut newest = 0;
        let mut accepted = 0u64;
        for ts in &stamps {
            aggregator.apply(&record("job", *ts, true));
            if *ts > newest {
                newest = *ts;
                accepted += 1;
            }
            let total = aggregator.get("job").unwrap().total_executions;
            prop_assert!(total >= previous_total);
            previous_total = total;
        }
        let metrics = aggregator.get("job").unwrap();
        prop_assert_eq!(metrics.total_executions, accepted);
        prop_assert_eq!(metrics.successful_executions + metrics.failed_executions, metrics.total_executions);
    }
}
