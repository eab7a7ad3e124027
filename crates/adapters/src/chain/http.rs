// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for a signing chain gateway.
//!
//! The gateway holds the account key and talks to the node. Endpoints:
//!
//! ```text
//! GET  {base}/chain_id  -> { "chain_id": 1 }
//! POST {base}/call      { from, contract, function, args } -> CallValue
//! POST {base}/send      { from, to, function, args, gas_limit, value } -> TxReceipt
//! ```

use super::{CallValue, ChainClient, ChainError, Transaction, TxReceipt};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `send` waits for confirmation, so it gets a longer timeout than reads.
const READ_TIMEOUT: Duration = Duration::from_secs(15);
const SEND_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Clone)]
pub struct HttpChainClient {
    client: reqwest::Client,
    base_url: String,
    account: String,
    auth_token: Option<String>,
}

#[derive(Serialize)]
struct CallRequest<'a> {
    from: &'a str,
    contract: &'a str,
    function: &'a str,
    args: Vec<CallValue>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    #[serde(flatten)]
    tx: Transaction,
}

#[derive(Deserialize)]
struct ChainIdResponse {
    chain_id: u64,
}

impl HttpChainClient {
    pub fn new(base_url: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account: account.into(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read_json<T: DeserializeOwned>(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, ChainError> {
        let response = response.map_err(|e| ChainError::Rpc(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::Rpc(format!("HTTP {}: {}", status.as_u16(), body.trim())));
        }
        response.json::<T>().await.map_err(|e| ChainError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    fn account(&self) -> &str {
        &self.account
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        let url = format!("{}/chain_id", self.base_url);
        let response = self.request(self.client.get(url)).timeout(READ_TIMEOUT).send().await;
        let body: ChainIdResponse = Self::read_json(response).await?;
        Ok(body.chain_id)
    }

    async fn sign_and_send(&self, tx: Transaction) -> Result<TxReceipt, ChainError> {
        let url = format!("{}/send", self.base_url);
        tracing::debug!(to = %tx.to, function = %tx.function, gas_limit = tx.gas_limit, "sending transaction");
        let body = SendRequest { from: &self.account, tx };
        let response =
            self.request(self.client.post(url)).timeout(SEND_TIMEOUT).json(&body).send().await;
        Self::read_json(response).await
    }

    async fn call(
        &self,
        contract: &str,
        function: &str,
        args: Vec<CallValue>,
    ) -> Result<CallValue, ChainError> {
        let url = format!("{}/call", self.base_url);
        let body = CallRequest { from: &self.account, contract, function, args };
        let response =
            self.request(self.client.post(url)).timeout(READ_TIMEOUT).json(&body).send().await;
        Self::read_json(response).await
    }
}
