// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning step commands through the shell.

use std::process::Stdio;
use std::time::Instant;

use crate::config::RunnerConfig;
use crate::error::{RunError, StepRef};
use crate::result::StepTrace;

/// Run `command` via `<shell> -c` in the configured working directory.
///
/// Stdout and stderr are inherited so tool output stays visible. Returns the
/// trace for any exit status; only a failure to spawn or wait is an error.
pub(crate) async fn run_shell(
    config: &RunnerConfig,
    at: &StepRef,
    command: &str,
) -> Result<StepTrace, RunError> {
    let start = Instant::now();
    let cmd_span = tracing::info_span!(
        "step.cmd",
        step = at.index,
        label = %at.label,
        exit_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    let mut process = tokio::process::Command::new(&config.shell);
    process
        .arg("-c")
        .arg(config.script(command))
        .current_dir(&config.cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let spawn_failed = |source: std::io::Error| RunError::SpawnFailed {
        step: at.clone(),
        command: command.to_string(),
        source,
    };
    let mut child = process.spawn().map_err(spawn_failed)?;
    let status = child.wait().await.map_err(spawn_failed)?;

    let duration = start.elapsed();
    let exit_code = status.code().unwrap_or(-1);
    cmd_span.record("exit_code", exit_code);
    cmd_span.record("duration_ms", duration.as_millis() as u64);

    Ok(StepTrace { command: command.to_string(), exit_code, duration })
}
