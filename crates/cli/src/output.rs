// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::color;
use clap::ValueEnum;
use serde::Serialize;
use uk_engine::{CleanupReport, PerformanceReport};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render as pretty JSON when `format` is `Json`, otherwise call `text_fn`.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => text_fn(),
    }
    Ok(())
}

const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;
const WEI_PER_MICRO_ETH: u128 = 1_000_000_000_000;

/// Wei as ether with up to six decimals (`0.0015 ETH`).
pub fn format_eth(wei: u128) -> String {
    let whole = wei / WEI_PER_ETH;
    let micros = (wei % WEI_PER_ETH) / WEI_PER_MICRO_ETH;
    if micros == 0 {
        return format!("{whole} ETH");
    }
    let frac = format!("{micros:06}");
    format!("{whole}.{} ETH", frac.trim_end_matches('0'))
}

/// Fraction as a one-decimal percentage (`0.917` → `91.7%`).
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Final report printed by `uk run`.
#[derive(Serialize)]
pub struct RunSummary<'a> {
    pub performance: &'a PerformanceReport,
    pub cleanup: &'a CleanupReport,
}

pub fn print_run_summary(summary: &RunSummary<'_>, format: OutputFormat) -> anyhow::Result<()> {
    format_or_json(format, summary, || {
        let report = summary.performance;
        println!(
            "{} {} ({} succeeded, {})",
            color::header("Executions:"),
            report.total_executions,
            report.successful_executions,
            format_percent(report.success_rate)
        );
        println!(
            "{} {} (avg {:.0} per execution)",
            color::header("Gas used:"),
            report.total_gas_used,
            report.average_gas_per_execution
        );
        println!("{} {}", color::header("Fees paid:"), format_eth(report.total_fees_paid));

        println!();
        println!("{:<10} {:>5} {:>7} {:>9}", "PROVIDER", "JOBS", "ACTIVE", "OBSERVED");
        for (id, provider) in &report.providers {
            println!(
                "{:<10} {:>5} {:>7} {:>9}",
                id.as_str(),
                provider.job_count,
                provider.active_jobs,
                provider.adapter.executions_observed
            );
        }

        if !report.jobs.is_empty() {
            println!();
            println!(
                "{:<20} {:<10} {:>5} {:>8} {:>9}  LAST ERROR",
                "JOB", "PROVIDER", "RUNS", "SUCCESS", "GAS/RUN"
            );
            for (name, job) in &report.jobs {
                println!(
                    "{:<20} {:<10} {:>5} {:>8} {:>9.0}  {}",
                    name,
                    job.provider.as_str(),
                    job.executions,
                    format_percent(job.success_rate),
                    job.gas_per_execution,
                    color::muted(job.last_error.as_deref().unwrap_or("-"))
                );
            }
        }

        let cleanup = summary.cleanup;
        println!();
        println!(
            "Cancelled {} job(s), {} failed",
            cleanup.cancelled.len(),
            cleanup.failed.len()
        );
        for failure in &cleanup.failed {
            println!("  {}: {}", failure.job, color::muted(&failure.error));
        }
    })
}
