// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest client for the relay network's public API.

use super::{RelayRequest, RelayTransport, RelayTransportError, TaskStatus};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_RELAY_URL: &str = "https://relay.gelato.digital/relays/v2/call";
pub const DEFAULT_STATUS_URL: &str = "https://api.gelato.digital";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct HttpRelayTransport {
    client: reqwest::Client,
    api_key: String,
    relay_url: String,
    status_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayResponse {
    task_id: String,
}

impl HttpRelayTransport {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            relay_url: DEFAULT_RELAY_URL.to_string(),
            status_url: DEFAULT_STATUS_URL.to_string(),
        }
    }

    /// Point at a different relay deployment (staging, local mock).
    pub fn with_urls(mut self, relay_url: impl Into<String>, status_url: impl Into<String>) -> Self {
        self.relay_url = relay_url.into();
        self.status_url = status_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn read_json<T: DeserializeOwned>(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, RelayTransportError> {
        let response = response.map_err(|e| RelayTransportError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayTransportError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }
        response.json::<T>().await.map_err(|e| RelayTransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn relay_call(&self, request: &RelayRequest) -> Result<String, RelayTransportError> {
        tracing::debug!(relay_target = %request.target, chain_id = request.chain_id, "submitting relay call");
        let response = self
            .client
            .post(&self.relay_url)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await;
        let body: RelayResponse = Self::read_json(response).await?;
        Ok(body.task_id)
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatus, RelayTransportError> {
        let url = format!("{}/tasks/{}/status", self.status_url, task_id);
        let response =
            self.client.get(url).bearer_auth(&self.api_key).timeout(REQUEST_TIMEOUT).send().await;
        Self::read_json(response).await
    }
}
