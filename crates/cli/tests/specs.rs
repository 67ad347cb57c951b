// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `cv` binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli/help.rs"]
mod cli_help;

#[path = "specs/cli/config.rs"]
mod cli_config;

#[path = "specs/cli/preflight.rs"]
mod cli_preflight;

#[path = "specs/cli/run.rs"]
mod cli_run;
