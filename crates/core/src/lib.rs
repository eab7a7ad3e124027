// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! uk-core: job model, execution records and metrics for the upkeep orchestrator

pub mod macros;

pub mod clock;
pub mod decimal;
pub mod execution;
pub mod hex_bytes;
pub mod id;
pub mod job;
pub mod metrics;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use execution::ExecutionRecord;
pub use id::{ProviderId, RegistrationId};
pub use job::{AutomationJob, JobError, JobStatus, Priority, ProviderChoice, HOURLY_SECS};
pub use metrics::{ratio, ExecutionMetrics};
