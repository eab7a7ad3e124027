// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_past_2020() {
    assert!(SystemClock.epoch_ms() > 1_577_836_800_000);
}

#[test]
fn fake_clock_advances_by_duration() {
    let clock = FakeClock::at(5_000);
    clock.advance(Duration::from_secs(60));
    assert_eq!(clock.epoch_ms(), 65_000);
}

#[test]
fn fake_clock_clones_share_time() {
    let a = FakeClock::new();
    let b = a.clone();
    b.advance(Duration::from_millis(250));
    assert_eq!(a.epoch_ms(), b.epoch_ms());
}

#[test]
fn fake_clock_set_epoch_ms() {
    let clock = FakeClock::default();
    clock.set_epoch_ms(42);
    assert_eq!(clock.epoch_ms(), 42);
}
