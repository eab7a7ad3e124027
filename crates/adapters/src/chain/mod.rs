// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blockchain client capability.
//!
//! Providers never sign or encode transactions themselves. They describe a
//! contract call by function name and typed arguments and hand it to a
//! [`ChainClient`], which owns the signing key, ABI encoding and receipt
//! polling.

mod http;

pub use http::HttpChainClient;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ChainCall, FakeChain, FAKE_ACCOUNT};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the chain client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// A typed contract argument or return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CallValue {
    Bool(bool),
    /// Unsigned integer, carried as a decimal string on the wire
    Uint(#[serde(with = "uk_core::decimal")] u128),
    Address(String),
    Bytes(#[serde(with = "uk_core::hex_bytes")] Vec<u8>),
    String(String),
    /// Function signature the client encodes as a 4-byte selector
    Selector(String),
    Tuple(Vec<CallValue>),
}

impl CallValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CallValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            CallValue::Uint(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CallValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&str> {
        match self {
            CallValue::Address(a) | CallValue::String(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[CallValue]> {
        match self {
            CallValue::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

/// A state-changing contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub to: String,
    pub function: String,
    pub args: Vec<CallValue>,
    pub gas_limit: u64,
    /// Native value attached (wei)
    #[serde(with = "uk_core::decimal", default)]
    pub value: u128,
}

impl Transaction {
    pub fn call(to: impl Into<String>, function: impl Into<String>, args: Vec<CallValue>) -> Self {
        Self { to: to.into(), function: function.into(), args, gas_limit: 0, value: 0 }
    }

    uk_core::setters! {
        set {
            gas_limit: u64,
        }
    }
}

/// Confirmation receipt for a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub hash: String,
    /// `false` when the transaction was mined but reverted
    pub success: bool,
    pub gas_used: u64,
    pub block: u64,
    /// gas used × effective gas price (wei)
    #[serde(with = "uk_core::decimal", default)]
    pub fee_paid: u128,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl TxReceipt {
    /// First log with the given event name.
    pub fn event(&self, name: &str) -> Option<&LogEntry> {
        self.logs.iter().find(|log| log.event == name)
    }
}

/// A decoded event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub address: String,
    pub event: String,
    #[serde(default)]
    pub values: Vec<CallValue>,
}

/// Signs, submits and reads on behalf of one account.
#[async_trait]
pub trait ChainClient: Send + Sync + 'static {
    /// Address transactions are sent from
    fn account(&self) -> &str;

    async fn chain_id(&self) -> Result<u64, ChainError>;

    /// Sign, submit and wait for the receipt. A reverted transaction is
    /// `Ok` with `success == false`; `Err` means it never confirmed.
    async fn sign_and_send(&self, tx: Transaction) -> Result<TxReceipt, ChainError>;

    /// Read-only call returning the decoded result.
    async fn call(
        &self,
        contract: &str,
        function: &str,
        args: Vec<CallValue>,
    ) -> Result<CallValue, ChainError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
