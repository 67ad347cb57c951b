// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cv-core: step, job and freshness types for the ClinVar pipeline driver

pub mod macros;

pub mod error;
pub mod freshness;
pub mod job;
pub mod step;
pub mod time_fmt;

pub use error::{ErrorKind, PipelineError};
pub use freshness::{Freshness, QueryOutcome, RemoteTime};
pub use job::Job;
pub use step::{quote, Step, StepBuilder, StepError};
pub use time_fmt::{format_elapsed, format_elapsed_ms, format_epoch, format_utc_now};
