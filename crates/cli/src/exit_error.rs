// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error carrying a process exit code.
//!
//! Commands return `ExitError` through `anyhow` and `main()` maps it to the
//! exit status. Anything else exits with [`ExitError::FAILURE`].

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub const FAILURE: i32 = 1;
    /// Bad configuration or job definitions
    pub const INVALID: i32 = 2;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn invalid(error: impl fmt::Display) -> Self {
        Self::new(Self::INVALID, error.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}

/// Exit code for an error returned from a command.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error.downcast_ref::<ExitError>().map_or(ExitError::FAILURE, |e| e.code)
}
