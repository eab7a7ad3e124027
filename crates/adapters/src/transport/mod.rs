// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Relay network HTTP capability.
//!
//! The relay adapter submits sponsored calls and reads task execution history
//! through a [`RelayTransport`], so tests can script the network without a
//! server.

mod http;

pub use http::{HttpRelayTransport, DEFAULT_RELAY_URL, DEFAULT_STATUS_URL};

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRelayTransport;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the relay transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayTransportError {
    /// The relay answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The request never got an answer
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Sponsored call submitted to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub chain_id: u64,
    pub target: String,
    #[serde(with = "uk_core::hex_bytes")]
    pub data: Vec<u8>,
    pub fee_token: String,
    #[serde(serialize_with = "as_string")]
    pub gas: u64,
}

/// Execution history for one task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(default)]
    pub executions: Vec<TaskExecution>,
}

/// One entry in a task's execution history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskExecution {
    #[serde(rename = "timestamp", with = "timestamp")]
    pub timestamp_ms: u64,
    #[serde(default)]
    pub gas_used: u64,
    #[serde(default, with = "uk_core::decimal")]
    pub fee_paid: u128,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn default_success() -> bool {
    true
}

impl TaskExecution {
    pub fn new(timestamp_ms: u64) -> Self {
        Self { timestamp_ms, gas_used: 0, fee_paid: 0, success: true, error: None }
    }

    uk_core::setters! {
        set {
            gas_used: u64,
            fee_paid: u128,
            success: bool,
        }
        option {
            error: String,
        }
    }
}

/// HTTP surface of a relay network.
#[async_trait]
pub trait RelayTransport: Send + Sync + 'static {
    /// Submit a sponsored call. Returns the relay's task handle.
    async fn relay_call(&self, request: &RelayRequest) -> Result<String, RelayTransportError>;

    async fn task_status(&self, task_id: &str) -> Result<TaskStatus, RelayTransportError>;
}

fn as_string<S: serde::Serializer>(n: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(n)
}

/// Execution timestamps arrive as RFC 3339 strings or integer epoch seconds.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(ms: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = i64::try_from(*ms).map_err(serde::ser::Error::custom)?;
        match DateTime::<Utc>::from_timestamp_millis(millis) {
            Some(dt) => serializer.collect_str(&dt.to_rfc3339()),
            None => Err(serde::ser::Error::custom("timestamp out of range")),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => Ok(secs.saturating_mul(1000)),
            Raw::Text(text) => {
                let dt = DateTime::parse_from_rfc3339(text.trim()).map_err(serde::de::Error::custom)?;
                u64::try_from(dt.timestamp_millis())
                    .map_err(|_| serde::de::Error::custom("timestamp before epoch"))
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
