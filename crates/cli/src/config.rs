// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk.toml` loading.
//!
//! ```toml
//! [chain]
//! gateway_url = "http://127.0.0.1:8645"
//! account = "0x..."
//!
//! [keeper]
//! enabled = true
//! registry = "0x..."
//! funding_token = "0x..."
//!
//! [relay]
//! enabled = true
//! api_key = "..."
//!
//! [[job]]
//! name = "harvest"
//! target = "0x..."
//! function = "harvestYield"
//! gas_limit = 300000
//! frequency_secs = 3600
//! priority = "high"
//! ```
//!
//! A provider is only built when its section says `enabled = true`, and an
//! enabled provider must have everything it needs to talk to the network.

use crate::env;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uk_adapters::transport::{DEFAULT_RELAY_URL, DEFAULT_STATUS_URL};
use uk_adapters::{KeeperConfig, KeeperProfile, ProviderProfile, RelayConfig, RelayProfile};
use uk_core::AutomationJob;
use uk_engine::MonitorConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file found; pass --config, set UK_CONFIG or create ./uk.toml")]
    NotFound,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("no providers enabled; set enabled = true under [keeper] or [relay]")]
    NoProviders,
    #[error("[{section}] is enabled but {field} is not set")]
    MissingField { section: &'static str, field: &'static str },
    #[error("[{0}] is enabled but there is no [chain] section")]
    MissingChain(&'static str),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorSection,
    pub chain: Option<ChainSection>,
    pub keeper: Option<KeeperSection>,
    pub relay: Option<RelaySection>,
    #[serde(default, rename = "job")]
    pub jobs: Vec<AutomationJob>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: u32,
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            max_backoff_secs: default_max_backoff_secs(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

fn default_max_backoff_secs() -> u64 {
    300
}

fn default_backoff_multiplier() -> u32 {
    2
}

/// Signing gateway shared by both providers.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainSection {
    pub gateway_url: String,
    pub account: String,
    pub auth_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeeperSection {
    #[serde(default)]
    pub enabled: bool,
    pub registry: Option<String>,
    pub funding_token: Option<String>,
    #[serde(default, with = "uk_core::decimal::option")]
    pub bond: Option<u128>,
    pub poll_interval_secs: Option<u64>,
    pub approve_gas: Option<u64>,
    pub register_gas: Option<u64>,
    pub admin_gas: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    #[serde(default)]
    pub enabled: bool,
    pub api_key: Option<String>,
    pub ops: Option<String>,
    pub fee_token: Option<String>,
    pub relay_url: Option<String>,
    pub status_url: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub create_gas: Option<u64>,
    pub cancel_gas: Option<u64>,
    pub relay_gas: Option<u64>,
}

/// Everything needed to build the relay adapter.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub config: RelayConfig,
    pub api_key: String,
    /// `(relay, status)` endpoint overrides
    pub urls: Option<(String, String)>,
}

/// `--config` > `UK_CONFIG` > `./uk.toml` > user config dir.
pub fn resolve_path(flag: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env::config_path() {
        return Ok(path);
    }
    let local = PathBuf::from(env::CONFIG_FILE);
    if local.is_file() {
        return Ok(local);
    }
    env::user_config_path().filter(|p| p.is_file()).ok_or(ConfigError::NotFound)
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::parse(&text, path)?;
        tracing::debug!(path = %path.display(), jobs = config.jobs.len(), "config loaded");
        Ok(config)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig::default()
            .max_backoff(Duration::from_secs(self.monitor.max_backoff_secs))
            .backoff_multiplier(self.monitor.backoff_multiplier)
    }

    /// Gateway for an enabled provider.
    pub fn chain(&self, section: &'static str) -> Result<&ChainSection, ConfigError> {
        self.chain.as_ref().ok_or(ConfigError::MissingChain(section))
    }

    /// `None` when the keeper is disabled.
    pub fn keeper_config(&self) -> Result<Option<KeeperConfig>, ConfigError> {
        let Some(section) = self.keeper.as_ref().filter(|s| s.enabled) else {
            return Ok(None);
        };
        let registry = required("keeper", "registry", &section.registry)?;
        let funding_token = required("keeper", "funding_token", &section.funding_token)?;
        self.chain("keeper")?;

        let mut config = KeeperConfig::new(registry, funding_token);
        if let Some(bond) = section.bond {
            config = config.bond(bond);
        }
        if let Some(gas) = section.approve_gas {
            config = config.approve_gas(gas);
        }
        if let Some(gas) = section.register_gas {
            config = config.register_gas(gas);
        }
        if let Some(gas) = section.admin_gas {
            config = config.admin_gas(gas);
        }
        let poll = env::keeper_poll().or(section.poll_interval_secs.map(Duration::from_secs));
        if let Some(interval) = poll {
            config = config.poll_interval(interval);
        }
        Ok(Some(config))
    }

    /// `None` when the relay is disabled.
    pub fn relay_settings(&self) -> Result<Option<RelaySettings>, ConfigError> {
        self.relay_settings_with(env::relay_api_key(), env::relay_poll())
    }

    fn relay_settings_with(
        &self,
        env_api_key: Option<String>,
        env_poll: Option<Duration>,
    ) -> Result<Option<RelaySettings>, ConfigError> {
        let Some(section) = self.relay.as_ref().filter(|s| s.enabled) else {
            return Ok(None);
        };
        let api_key = match env_api_key {
            Some(key) => key,
            None => required("relay", "api_key", &section.api_key)?,
        };
        self.chain("relay")?;

        let mut config = RelayConfig::default();
        if let Some(ops) = &section.ops {
            config = config.ops(ops);
        }
        if let Some(token) = &section.fee_token {
            config = config.fee_token(token);
        }
        if let Some(gas) = section.create_gas {
            config = config.create_gas(gas);
        }
        if let Some(gas) = section.cancel_gas {
            config = config.cancel_gas(gas);
        }
        if let Some(gas) = section.relay_gas {
            config = config.relay_gas(gas);
        }
        if let Some(interval) = env_poll.or(section.poll_interval_secs.map(Duration::from_secs)) {
            config = config.poll_interval(interval);
        }

        let urls = match (&section.relay_url, &section.status_url) {
            (None, None) => None,
            (relay, status) => Some((
                relay.clone().unwrap_or_else(|| DEFAULT_RELAY_URL.to_string()),
                status.clone().unwrap_or_else(|| DEFAULT_STATUS_URL.to_string()),
            )),
        };
        Ok(Some(RelaySettings { config, api_key, urls }))
    }

    /// Scoring profiles for every enabled provider, keeper first.
    ///
    /// Validates the same credentials `uk run` needs, without touching the
    /// network.
    pub fn profiles(&self) -> Result<Vec<Arc<dyn ProviderProfile>>, ConfigError> {
        let mut profiles: Vec<Arc<dyn ProviderProfile>> = Vec::new();
        if self.keeper_config()?.is_some() {
            profiles.push(Arc::new(KeeperProfile));
        }
        if self.relay_settings()?.is_some() {
            profiles.push(Arc::new(RelayProfile));
        }
        if profiles.is_empty() {
            return Err(ConfigError::NoProviders);
        }
        Ok(profiles)
    }
}

fn required(
    section: &'static str,
    field: &'static str,
    value: &Option<String>,
) -> Result<String, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingField { section, field })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
