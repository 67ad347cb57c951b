// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only logger for per-job run logs.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use cv_core::format_utc_now;

/// Append-only logger for per-job run logs.
///
/// Writes human-readable timestamped lines to `<log_dir>/<job>.log`.
///
/// Each `append()` call opens, writes, and closes the file, which is fine
/// for one line per step decision.
#[derive(Debug, Clone)]
pub struct RunLog {
    log_dir: PathBuf,
}

impl RunLog {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self { log_dir: log_dir.into() }
    }

    /// Path of the log file for `job`.
    pub fn path(&self, job: &str) -> PathBuf {
        let name: String = job
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
            .collect();
        self.log_dir.join(format!("{name}.log"))
    }

    /// Append a log line for the given job.
    ///
    /// Format: `2026-01-30T08:14:09Z [step] message`
    ///
    /// Failures are logged via tracing but do not propagate; a broken log
    /// must not break the run.
    pub fn append(&self, job: &str, step: &str, message: &str) {
        let path = self.path(job);
        if let Err(e) = write_line(&path, step, message) {
            tracing::warn!(job, path = %path.display(), error = %e, "failed to write run log");
        }
    }
}

fn write_line(path: &Path, step: &str, message: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{} [{}] {}", format_utc_now(), step, message)?;
    Ok(())
}

#[cfg(test)]
#[path = "run_log_tests.rs"]
mod tests;
