// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! uk-engine: provider selection, job registry, metrics and the orchestrator

mod error;
mod metrics;
mod monitor;
mod orchestrator;
mod registry;
mod report;
pub mod selector;

pub use error::OrchestratorError;
pub use metrics::MetricsAggregator;
pub use monitor::MonitorConfig;
pub use orchestrator::{CleanupFailure, CleanupReport, MonitorHandle, Orchestrator};
pub use registry::{JobEntry, JobRegistry};
pub use report::{
    JobPerformance, JobStatusEntry, JobStatusReport, PerformanceReport, ProviderPerformance,
};
pub use selector::{ScoreBreakdown, SelectError, Selection};
