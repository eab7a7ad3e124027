// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! uk: route automation jobs to keeper and relay providers

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use config::Config;
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "uk", version, about = "Route automation jobs to keeper and relay providers")]
#[command(styles = color::styles())]
struct Cli {
    /// Config file (default: $UK_CONFIG, ./uk.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show which provider each job would use, without touching the network
    Plan,
    /// Deploy every job and monitor executions until Ctrl-C
    Run,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = dispatch(cli).await {
        let code = exit_error::exit_code(&e);
        eprintln!("error: {e:#}");
        std::process::exit(code);
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let path = config::resolve_path(cli.config.as_deref()).map_err(exit_error::ExitError::invalid)?;
    let config = Config::load(&path).map_err(exit_error::ExitError::invalid)?;

    match command {
        Command::Plan => commands::plan::handle(&config, cli.format),
        Command::Run => commands::run::handle(config, cli.format).await,
    }
}

/// Logs go to stderr so `--format json` output stays parseable.
fn init_tracing() {
    let filter =
        EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
