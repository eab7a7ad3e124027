// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::time::Duration;

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE: &str = "uk.toml";

/// Explicit config path (`UK_CONFIG`)
pub fn config_path() -> Option<PathBuf> {
    std::env::var("UK_CONFIG").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// User-level config: `<config dir>/upkeep/uk.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("upkeep").join(CONFIG_FILE))
}

/// Log filter directives (`UK_LOG`, default `info`)
pub fn log_filter() -> String {
    std::env::var("UK_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "info".to_string())
}

/// Relay API key. Takes precedence over `[relay] api_key`.
pub fn relay_api_key() -> Option<String> {
    std::env::var("UK_RELAY_API_KEY").ok().filter(|s| !s.is_empty())
}

/// Keeper poll interval override (`UK_KEEPER_POLL_MS`)
pub fn keeper_poll() -> Option<Duration> {
    duration_ms("UK_KEEPER_POLL_MS")
}

/// Relay poll interval override (`UK_RELAY_POLL_MS`)
pub fn relay_poll() -> Option<Duration> {
    duration_ms("UK_RELAY_POLL_MS")
}

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}
