// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable in-memory chain for tests.

use super::{CallValue, ChainClient, ChainError, LogEntry, Transaction, TxReceipt};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Account every fake transaction is sent from.
pub const FAKE_ACCOUNT: &str = "0x000000000000000000000000000000000000a11c";

/// Recorded read-only call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainCall {
    pub contract: String,
    pub function: String,
    pub args: Vec<CallValue>,
}

type CallKey = (String, String);

struct FakeChainState {
    chain_id: u64,
    sticky: HashMap<CallKey, Result<CallValue, ChainError>>,
    queued: HashMap<CallKey, VecDeque<Result<CallValue, ChainError>>>,
    receipts: VecDeque<Result<TxReceipt, ChainError>>,
    calls: Vec<ChainCall>,
    sent: Vec<Transaction>,
    next_block: u64,
}

/// Fake [`ChainClient`] with scripted call results and receipts.
///
/// Read calls return the next queued result for `(contract, function)`, then
/// the sticky result, then an RPC error. Sends pop the next scripted receipt
/// or synthesize a successful one.
#[derive(Clone)]
pub struct FakeChain {
    account: String,
    inner: Arc<Mutex<FakeChainState>>,
}

impl Default for FakeChain {
    fn default() -> Self {
        Self {
            account: FAKE_ACCOUNT.to_string(),
            inner: Arc::new(Mutex::new(FakeChainState {
                chain_id: 1,
                sticky: HashMap::new(),
                queued: HashMap::new(),
                receipts: VecDeque::new(),
                calls: Vec::new(),
                sent: Vec::new(),
                next_block: 100,
            })),
        }
    }
}

impl FakeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `value` for every call to `contract.function`.
    pub fn set_call(&self, contract: &str, function: &str, value: CallValue) {
        self.inner.lock().sticky.insert((contract.to_string(), function.to_string()), Ok(value));
    }

    /// Fail every call to `contract.function`.
    pub fn fail_call(&self, contract: &str, function: &str, message: &str) {
        self.inner.lock().sticky.insert(
            (contract.to_string(), function.to_string()),
            Err(ChainError::Rpc(message.to_string())),
        );
    }

    /// Return `result` for the next call to `contract.function` only.
    pub fn queue_call(&self, contract: &str, function: &str, result: Result<CallValue, ChainError>) {
        self.inner
            .lock()
            .queued
            .entry((contract.to_string(), function.to_string()))
            .or_default()
            .push_back(result);
    }

    pub fn push_receipt(&self, receipt: TxReceipt) {
        self.inner.lock().receipts.push_back(Ok(receipt));
    }

    pub fn push_send_error(&self, message: &str) {
        self.inner.lock().receipts.push_back(Err(ChainError::Rpc(message.to_string())));
    }

    /// Successful receipt carrying one event log.
    pub fn receipt_with_event(event: &str, values: Vec<CallValue>) -> TxReceipt {
        TxReceipt {
            hash: format!("0x{}", event.to_lowercase()),
            success: true,
            gas_used: 150_000,
            block: 1,
            fee_paid: 0,
            logs: vec![LogEntry { address: String::new(), event: event.to_string(), values }],
        }
    }

    /// Mined-but-reverted receipt.
    pub fn reverted_receipt(gas_used: u64) -> TxReceipt {
        TxReceipt {
            hash: "0xreverted".to_string(),
            success: false,
            gas_used,
            block: 1,
            fee_paid: gas_used as u128,
            logs: Vec::new(),
        }
    }

    pub fn calls(&self) -> Vec<ChainCall> {
        self.inner.lock().calls.clone()
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.inner.lock().sent.clone()
    }

    /// Function names of sent transactions, in order.
    pub fn sent_functions(&self) -> Vec<String> {
        self.inner.lock().sent.iter().map(|tx| tx.function.clone()).collect()
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    fn account(&self) -> &str {
        &self.account
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        Ok(self.inner.lock().chain_id)
    }

    async fn sign_and_send(&self, tx: Transaction) -> Result<TxReceipt, ChainError> {
        let mut state = self.inner.lock();
        let gas_limit = tx.gas_limit;
        state.sent.push(tx);
        let block = state.next_block;
        state.next_block += 1;
        match state.receipts.pop_front() {
            Some(Ok(mut receipt)) => {
                receipt.block = block;
                Ok(receipt)
            }
            Some(Err(e)) => Err(e),
            None => {
                let gas_used = gas_limit / 2;
                Ok(TxReceipt {
                    hash: format!("0x{:064x}", block),
                    success: true,
                    gas_used,
                    block,
                    fee_paid: gas_used as u128 * 10_000_000_000,
                    logs: Vec::new(),
                })
            }
        }
    }

    async fn call(
        &self,
        contract: &str,
        function: &str,
        args: Vec<CallValue>,
    ) -> Result<CallValue, ChainError> {
        let mut state = self.inner.lock();
        state.calls.push(ChainCall {
            contract: contract.to_string(),
            function: function.to_string(),
            args,
        });
        let key = (contract.to_string(), function.to_string());
        if let Some(result) = state.queued.get_mut(&key).and_then(|q| q.pop_front()) {
            return result;
        }
        match state.sticky.get(&key) {
            Some(result) => result.clone(),
            None => Err(ChainError::Rpc(format!("no result scripted for {contract}.{function}"))),
        }
    }
}
