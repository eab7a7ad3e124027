// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk run`: deploy every job and monitor until Ctrl-C.

use crate::config::{ChainSection, Config, ConfigError};
use crate::exit_error::ExitError;
use crate::output::{print_run_summary, OutputFormat, RunSummary};
use std::sync::Arc;
use uk_adapters::{
    HttpChainClient, HttpRelayTransport, KeeperAdapter, ProviderAdapter, RelayAdapter,
};
use uk_engine::Orchestrator;

pub async fn handle(config: Config, format: OutputFormat) -> anyhow::Result<()> {
    let adapters = build_adapters(&config).map_err(ExitError::invalid)?;
    let orchestrator = Orchestrator::new(adapters)?.monitor_config(config.monitor_config());

    for job in &config.jobs {
        orchestrator.add_job(job.clone()).map_err(ExitError::invalid)?;
    }

    let mut deployed = 0;
    for job in &config.jobs {
        match orchestrator.deploy_job(&job.name).await {
            Ok(_) => deployed += 1,
            Err(e) => tracing::error!(job = %job.name, error = %e, "deploy failed"),
        }
    }
    if deployed == 0 {
        return Err(ExitError::new(ExitError::FAILURE, "no jobs were deployed").into());
    }

    let monitor = orchestrator.spawn_monitor();
    tracing::info!(deployed, "monitoring; press Ctrl-C to stop");
    let interrupted = tokio::signal::ctrl_c().await;
    monitor.shutdown().await;
    let cleanup = orchestrator.cleanup().await;
    interrupted?;

    let performance = orchestrator.get_performance_report();
    print_run_summary(&RunSummary { performance: &performance, cleanup: &cleanup }, format)?;
    if !cleanup.failed.is_empty() {
        let message = format!("{} job(s) could not be cancelled", cleanup.failed.len());
        return Err(ExitError::new(ExitError::FAILURE, message).into());
    }
    Ok(())
}

/// Adapters for every enabled provider, keeper first.
fn build_adapters(config: &Config) -> Result<Vec<Arc<dyn ProviderAdapter>>, ConfigError> {
    let mut adapters: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

    if let Some(keeper) = config.keeper_config()? {
        let chain = chain_client(config.chain("keeper")?);
        adapters.push(Arc::new(KeeperAdapter::new(chain, keeper)));
    }

    if let Some(relay) = config.relay_settings()? {
        let chain = chain_client(config.chain("relay")?);
        let mut transport = HttpRelayTransport::new(relay.api_key);
        if let Some((relay_url, status_url)) = relay.urls {
            transport = transport.with_urls(relay_url, status_url);
        }
        adapters.push(Arc::new(RelayAdapter::new(chain, transport, relay.config)));
    }

    if adapters.is_empty() {
        return Err(ConfigError::NoProviders);
    }
    Ok(adapters)
}

fn chain_client(section: &ChainSection) -> HttpChainClient {
    let client = HttpChainClient::new(&section.gateway_url, &section.account);
    match &section.auth_token {
        Some(token) => client.with_auth_token(token),
        None => client,
    }
}
