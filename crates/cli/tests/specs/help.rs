// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and usage output.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn help_lists_commands() {
    cli().args(&["--help"]).passes().stdout_has("plan").stdout_has("run");
}

#[test]
fn plan_help_shows_options() {
    cli().args(&["plan", "--help"]).passes().stdout_has("--config").stdout_has("--format");
}

#[test]
fn version_shows_package_version() {
    cli().args(&["--version"]).passes().stdout_has(env!("CARGO_PKG_VERSION"));
}

#[test]
fn unknown_command_is_a_usage_error() {
    cli().args(&["deploy"]).exits_with(2).stdout_lacks("Usage: uk deploy");
}
