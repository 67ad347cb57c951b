// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runner error types.

use std::fmt;
use std::path::PathBuf;

use cv_core::{PipelineError, Step};

use crate::result::BatchReport;

/// Position and label of a step within its job or queue (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRef {
    pub index: usize,
    pub label: String,
}

impl StepRef {
    pub(crate) fn new(position: usize, step: &Step) -> Self {
        Self { index: position + 1, label: step.label().into_owned() }
    }
}

impl fmt::Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.index, self.label)
    }
}

/// Errors that stop a job or fail a parallel batch.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A declared input is absent and nothing earlier in the job makes it.
    #[error("{step}: input {} does not exist", .path.display())]
    MissingInput { step: StepRef, path: PathBuf },

    /// The shell could not be started.
    #[error("{step}: failed to spawn `{command}`: {source}")]
    SpawnFailed {
        step: StepRef,
        command: String,
        source: std::io::Error,
    },

    /// The command exited with non-zero status.
    #[error("{step}: `{command}` failed with exit code {exit_code}")]
    StepFailed {
        step: StepRef,
        command: String,
        exit_code: i32,
    },

    /// The command succeeded but a declared output is absent afterwards.
    #[error("{step}: expected output {} was not created by `{command}`", .path.display())]
    MissingOutput {
        step: StepRef,
        command: String,
        path: PathBuf,
    },

    /// A file's metadata could not be read.
    #[error("{step}: cannot read modification time of {}: {source}", .path.display())]
    Stat {
        step: StepRef,
        path: PathBuf,
        source: std::io::Error,
    },

    /// A parallel task ended abnormally (panicked or was cancelled).
    #[error("{step}: task aborted: {message}")]
    Aborted { step: StepRef, message: String },

    /// One or more queued steps failed.
    #[error("{failed} of {total} parallel steps failed")]
    BatchFailed {
        failed: usize,
        total: usize,
        report: BatchReport,
    },
}

impl RunError {
    /// The step this error refers to, if it concerns a single step.
    pub fn step(&self) -> Option<&StepRef> {
        match self {
            RunError::MissingInput { step, .. }
            | RunError::SpawnFailed { step, .. }
            | RunError::StepFailed { step, .. }
            | RunError::MissingOutput { step, .. }
            | RunError::Stat { step, .. }
            | RunError::Aborted { step, .. } => Some(step),
            RunError::BatchFailed { .. } => None,
        }
    }
}

impl From<RunError> for PipelineError {
    fn from(e: RunError) -> Self {
        PipelineError::step_execution(e)
    }
}
