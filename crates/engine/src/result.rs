// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured run reports and per-step trace records.

use std::time::Duration;

use crate::error::{RunError, StepRef};
use crate::staleness::StaleReason;

/// Record of a single command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTrace {
    /// Rendered command text.
    pub command: String,
    /// Exit code returned by the shell (`-1` if killed by a signal).
    pub exit_code: i32,
    /// Wall-clock duration.
    pub duration: Duration,
}

/// What happened to one step of a sequential job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Every declared output was up to date.
    Skipped,
    /// The command ran successfully.
    Ran { reason: StaleReason, trace: StepTrace },
    /// Dry run: the command would have run.
    WouldRun { reason: StaleReason },
}

impl StepOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped)
    }

    /// Why the step ran (or would run); `None` when skipped.
    pub fn reason(&self) -> Option<&StaleReason> {
        match self {
            StepOutcome::Skipped => None,
            StepOutcome::Ran { reason, .. } | StepOutcome::WouldRun { reason } => Some(reason),
        }
    }
}

/// Outcome of a sequential job that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub job: String,
    pub steps: Vec<(StepRef, StepOutcome)>,
}

impl JobReport {
    pub fn ran(&self) -> usize {
        self.steps.iter().filter(|(_, o)| matches!(o, StepOutcome::Ran { .. })).count()
    }

    pub fn skipped(&self) -> usize {
        self.steps.iter().filter(|(_, o)| o.is_skipped()).count()
    }
}

/// One queued step's result. The trace is `None` in dry runs.
#[derive(Debug)]
pub struct BatchItem {
    pub step: StepRef,
    pub result: Result<Option<StepTrace>, RunError>,
}

/// Outcome of a parallel batch, in queue order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn failed(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|item| item.result.is_err())
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|item| item.result.is_ok())
    }
}
