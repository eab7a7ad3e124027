// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator error types

use crate::selector::SelectError;
use thiserror::Error;
use uk_adapters::ProviderError;
use uk_core::{JobError, ProviderId};

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("no providers configured")]
    NoProviders,
    #[error("provider {0} registered more than once")]
    DuplicateProvider(ProviderId),
    #[error(transparent)]
    InvalidJob(#[from] JobError),
    #[error("job {0} already exists")]
    DuplicateJob(String),
    #[error(transparent)]
    Selection(#[from] SelectError),
    #[error("job {0} not found")]
    JobNotFound(String),
    #[error("provider {0} is not initialized")]
    ProviderNotInitialized(ProviderId),
    #[error("job {0} is already deployed")]
    AlreadyDeployed(String),
    #[error("job {0} is still deploying")]
    DeployInProgress(String),
    #[error("job {0} is inactive")]
    JobInactive(String),
    #[error("job {job}: {source}")]
    Provider {
        job: String,
        #[source]
        source: ProviderError,
    },
}
