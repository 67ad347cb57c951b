// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runner configuration.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Settings shared by every step a [`JobRunner`](crate::JobRunner) executes.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Working directory for commands; relative step paths resolve against it.
    pub cwd: PathBuf,
    /// Shell used as `<shell> -c <command>`.
    pub shell: String,
    /// Prefix commands with `set -o pipefail`.
    pub pipefail: bool,
    /// File that defines the pipeline. A step whose outputs are older than
    /// this file is re-run, as if it were an input of every step.
    pub definition_source: Option<PathBuf>,
    /// Re-run every step regardless of timestamps.
    pub force: bool,
    /// Log what would run without spawning anything.
    pub dry_run: bool,
    /// Upper bound on concurrently running queued steps.
    pub parallelism: Option<usize>,
    /// Directory for per-job run logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            shell: "bash".to_string(),
            pipefail: true,
            definition_source: None,
            force: false,
            dry_run: false,
            parallelism: None,
            log_dir: None,
        }
    }
}

impl RunnerConfig {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into(), ..Self::default() }
    }

    cv_core::setters! {
        into { cwd: PathBuf, shell: String }
        set { pipefail: bool, force: bool, dry_run: bool }
        option { definition_source: PathBuf, log_dir: PathBuf }
    }

    pub fn parallelism(mut self, limit: usize) -> Self {
        self.parallelism = Some(limit);
        self
    }

    /// Resolve a step path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Number of queued steps allowed to run at once.
    ///
    /// Defaults to the host's available parallelism; never more than the
    /// number of queued steps and never less than one.
    pub fn effective_parallelism(&self, queued: usize) -> usize {
        let limit = self.parallelism.unwrap_or_else(|| {
            std::thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
        });
        limit.min(queued).max(1)
    }

    /// The script handed to `<shell> -c`.
    pub(crate) fn script(&self, command: &str) -> String {
        if self.pipefail {
            format!("set -o pipefail\n{command}")
        } else {
            command.to_string()
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
