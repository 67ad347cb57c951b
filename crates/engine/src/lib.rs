// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cv-engine: incremental job execution and remote freshness checks

mod config;
mod error;
mod freshness;
mod process;
mod result;
mod run_log;
mod runner;
mod staleness;

pub use config::RunnerConfig;
pub use error::{RunError, StepRef};
pub use freshness::FreshnessChecker;
pub use result::{BatchItem, BatchReport, JobReport, StepOutcome, StepTrace};
pub use run_log::RunLog;
pub use runner::JobRunner;
pub use staleness::{StaleReason, Staleness};
