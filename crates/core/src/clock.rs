// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock abstraction.
//!
//! Execution timestamps, deploy stamps and keeper frequency gating all read
//! time through [`Clock`] so tests can drive them deterministically.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current wall-clock time in epoch milliseconds.
pub trait Clock: Clone + Send + Sync + 'static {
    fn epoch_ms(&self) -> u64;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

/// Manually driven clock for tests. Clones share the same time.
#[derive(Clone, Debug)]
pub struct FakeClock {
    epoch_ms: Arc<Mutex<u64>>,
}

impl FakeClock {
    /// Starts at 2026-01-01T00:00:00Z.
    pub fn new() -> Self {
        Self::at(1_767_225_600_000)
    }

    pub fn at(epoch_ms: u64) -> Self {
        Self { epoch_ms: Arc::new(Mutex::new(epoch_ms)) }
    }

    pub fn advance(&self, duration: Duration) {
        *self.epoch_ms.lock() += duration.as_millis() as u64;
    }

    pub fn set_epoch_ms(&self, ms: u64) {
        *self.epoch_ms.lock() = ms;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn epoch_ms(&self) -> u64 {
        *self.epoch_ms.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
