// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! uk-adapters: chain and relay clients plus the provider adapters built on them

pub mod chain;
pub mod provider;
pub mod transport;

pub use chain::{CallValue, ChainClient, ChainError, HttpChainClient, Transaction, TxReceipt};
pub use provider::keeper::{KeeperAdapter, KeeperConfig, UpkeepInfo, UpkeepRecord};
pub use provider::relay::{RelayAdapter, RelayConfig, TaskRecord};
pub use provider::{
    KeeperProfile, PollError, PollOutcome, ProviderAdapter, ProviderError, ProviderProfile,
    ProviderSummary, RelayProfile,
};
pub use transport::{
    HttpRelayTransport, RelayRequest, RelayTransport, RelayTransportError, TaskExecution,
    TaskStatus,
};

#[cfg(any(test, feature = "test-support"))]
pub use chain::{ChainCall, FakeChain, FAKE_ACCOUNT};
#[cfg(any(test, feature = "test-support"))]
pub use provider::{FakeProviderAdapter, ProviderCall};
#[cfg(any(test, feature = "test-support"))]
pub use transport::FakeRelayTransport;
