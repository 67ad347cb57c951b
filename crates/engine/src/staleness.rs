// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Up-to-date checks from file modification times.
//!
//! A step is up to date when it declares at least one output, every output
//! exists, and the oldest output is at least as new as the newest input and
//! the pipeline definition source. Nothing is hashed and nothing is cached:
//! every decision is re-read from the filesystem.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use cv_core::Step;

use crate::config::RunnerConfig;
use crate::error::{RunError, StepRef};

/// Why a step has to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    /// The step declares no outputs, so it can never be satisfied.
    NoOutputs,
    /// Forced re-run.
    Forced,
    MissingOutput(PathBuf),
    OlderThanInput { output: PathBuf, input: PathBuf },
    OlderThanDefinition { output: PathBuf, source: PathBuf },
    /// Dry run: an input would be rebuilt by an earlier step.
    UpstreamPending(PathBuf),
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::NoOutputs => f.write_str("no declared outputs"),
            StaleReason::Forced => f.write_str("forced"),
            StaleReason::MissingOutput(path) => write!(f, "{} is missing", path.display()),
            StaleReason::OlderThanInput { output, input } => {
                write!(f, "{} is older than {}", output.display(), input.display())
            }
            StaleReason::OlderThanDefinition { output, source } => {
                write!(f, "{} is older than {}", output.display(), source.display())
            }
            StaleReason::UpstreamPending(path) => {
                write!(f, "{} would be rebuilt", path.display())
            }
        }
    }
}

/// Result of an up-to-date check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    UpToDate,
    Stale(StaleReason),
}

/// Modification time of `path`, or `None` if it does not exist.
pub(crate) fn modified(path: &Path) -> io::Result<Option<SystemTime>> {
    match std::fs::metadata(path) {
        Ok(meta) => meta.modified().map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Filesystem view used while walking one job.
pub(crate) struct Inspector<'a> {
    config: &'a RunnerConfig,
    /// Resolved outputs of steps that would run (dry run only).
    pending: &'a HashSet<PathBuf>,
}

impl<'a> Inspector<'a> {
    pub(crate) fn new(config: &'a RunnerConfig, pending: &'a HashSet<PathBuf>) -> Self {
        Self { config, pending }
    }

    fn stat(&self, step: &StepRef, path: &Path) -> Result<Option<SystemTime>, RunError> {
        modified(path).map_err(|source| RunError::Stat {
            step: step.clone(),
            path: path.to_path_buf(),
            source,
        })
    }

    /// First declared input that neither exists nor is pending.
    pub(crate) fn missing_input(
        &self,
        at: &StepRef,
        step: &Step,
    ) -> Result<Option<PathBuf>, RunError> {
        for input in step.inputs() {
            let resolved = self.config.resolve(input);
            if self.pending.contains(&resolved) {
                continue;
            }
            if self.stat(at, &resolved)?.is_none() {
                return Ok(Some(input.clone()));
            }
        }
        Ok(None)
    }

    pub(crate) fn evaluate(&self, at: &StepRef, step: &Step) -> Result<Staleness, RunError> {
        if step.outputs().is_empty() {
            return Ok(Staleness::Stale(StaleReason::NoOutputs));
        }
        if self.config.force {
            return Ok(Staleness::Stale(StaleReason::Forced));
        }

        let mut newest_input: Option<(&PathBuf, SystemTime)> = None;
        for input in step.inputs() {
            let resolved = self.config.resolve(input);
            if self.pending.contains(&resolved) {
                return Ok(Staleness::Stale(StaleReason::UpstreamPending(input.clone())));
            }
            if let Some(mtime) = self.stat(at, &resolved)? {
                if newest_input.map_or(true, |(_, newest)| mtime > newest) {
                    newest_input = Some((input, mtime));
                }
            }
        }

        let mut oldest_output: Option<(&PathBuf, SystemTime)> = None;
        for output in step.outputs() {
            let Some(mtime) = self.stat(at, &self.config.resolve(output))? else {
                return Ok(Staleness::Stale(StaleReason::MissingOutput(output.clone())));
            };
            if oldest_output.map_or(true, |(_, oldest)| mtime < oldest) {
                oldest_output = Some((output, mtime));
            }
        }
        let Some((output, output_time)) = oldest_output else {
            return Ok(Staleness::Stale(StaleReason::NoOutputs));
        };

        if let Some((input, input_time)) = newest_input {
            if output_time < input_time {
                return Ok(Staleness::Stale(StaleReason::OlderThanInput {
                    output: output.clone(),
                    input: input.clone(),
                }));
            }
        }

        if let Some(source) = &self.config.definition_source {
            if let Some(source_time) = self.stat(at, source)? {
                if output_time < source_time {
                    return Ok(Staleness::Stale(StaleReason::OlderThanDefinition {
                        output: output.clone(),
                        source: source.clone(),
                    }));
                }
            }
        }

        Ok(Staleness::UpToDate)
    }
}

#[cfg(test)]
#[path = "staleness_tests.rs"]
mod tests;
