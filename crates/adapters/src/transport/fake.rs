// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable relay network for tests.

use super::{RelayRequest, RelayTransport, RelayTransportError, TaskExecution, TaskStatus};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

#[derive(Default)]
struct FakeRelayState {
    next_task: u64,
    relay_results: VecDeque<Result<String, RelayTransportError>>,
    histories: HashMap<String, Vec<TaskExecution>>,
    status_errors: HashMap<String, VecDeque<RelayTransportError>>,
    requests: Vec<RelayRequest>,
    status_queries: Vec<String>,
}

/// Fake [`RelayTransport`].
///
/// `relay_call` pops the next scripted result or hands out `relay-task-N`.
/// `task_status` returns the history appended for that task, in the order it
/// was appended, after draining any queued errors.
#[derive(Clone, Default)]
pub struct FakeRelayTransport {
    inner: Arc<Mutex<FakeRelayState>>,
}

impl FakeRelayTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_relay_result(&self, result: Result<String, RelayTransportError>) {
        self.inner.lock().relay_results.push_back(result);
    }

    /// Append one execution to a task's history.
    pub fn push_execution(&self, task_id: &str, execution: TaskExecution) {
        self.inner.lock().histories.entry(task_id.to_string()).or_default().push(execution);
    }

    /// Fail the next status query for a task.
    pub fn fail_status(&self, task_id: &str, error: RelayTransportError) {
        self.inner.lock().status_errors.entry(task_id.to_string()).or_default().push_back(error);
    }

    pub fn requests(&self) -> Vec<RelayRequest> {
        self.inner.lock().requests.clone()
    }

    pub fn status_queries(&self) -> Vec<String> {
        self.inner.lock().status_queries.clone()
    }
}

#[async_trait]
impl RelayTransport for FakeRelayTransport {
    async fn relay_call(&self, request: &RelayRequest) -> Result<String, RelayTransportError> {
        let mut state = self.inner.lock();
        state.requests.push(request.clone());
        if let Some(result) = state.relay_results.pop_front() {
            return result;
        }
        state.next_task += 1;
        Ok(format!("relay-task-{}", state.next_task))
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatus, RelayTransportError> {
        let mut state = self.inner.lock();
        state.status_queries.push(task_id.to_string());
        if let Some(error) = state.status_errors.get_mut(task_id).and_then(|q| q.pop_front()) {
            return Err(error);
        }
        let executions = state.histories.get(task_id).cloned().unwrap_or_default();
        Ok(TaskStatus { executions })
    }
}
