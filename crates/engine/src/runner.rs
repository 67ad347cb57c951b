// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job runner: sequential jobs with up-to-date skipping, and a queue of
//! independent steps executed in parallel.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use cv_core::{format_elapsed_ms, Job, Step};
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::config::RunnerConfig;
use crate::error::{RunError, StepRef};
use crate::process::run_shell;
use crate::result::{BatchItem, BatchReport, JobReport, StepOutcome, StepTrace};
use crate::run_log::RunLog;
use crate::staleness::{modified, Inspector, Staleness};

/// Run-log name for the parallel queue.
const QUEUE_LOG: &str = "parallel";

/// Executes jobs against the filesystem.
///
/// Holds no state across runs beyond the queue of parallel steps; every
/// skip decision is recomputed from file modification times.
pub struct JobRunner {
    config: Arc<RunnerConfig>,
    log: Option<RunLog>,
    queue: Vec<Step>,
    /// Resolved outputs of queued steps a dry run skipped; later jobs treat
    /// them as pending.
    queued_outputs: HashSet<PathBuf>,
}

impl JobRunner {
    pub fn new(config: RunnerConfig) -> Self {
        let log = config.log_dir.as_ref().map(RunLog::new);
        Self { config: Arc::new(config), log, queue: Vec::new(), queued_outputs: HashSet::new() }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Queue an independent step for the next [`run_queued`](Self::run_queued).
    ///
    /// Queued steps must not read or write each other's files.
    pub fn add_parallel(&mut self, step: Step) {
        debug!(label = %step.label(), command = %step.render(), "queued step");
        self.queue.push(step);
    }

    /// Number of steps waiting in the parallel queue.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    // -----------------------------------------------------------------------
    // Sequential jobs
    // -----------------------------------------------------------------------

    /// Run a job's steps strictly in order.
    ///
    /// Up-to-date steps are skipped. The first failing step (non-zero exit,
    /// missing input, or missing output afterwards) aborts the job.
    pub async fn run(&self, job: &Job) -> Result<JobReport, RunError> {
        info!(job = job.name(), steps = job.len(), dry_run = self.config.dry_run, "running job");
        let mut report = JobReport { job: job.name().to_string(), steps: Vec::new() };
        // Outputs of steps that would run (dry run only).
        let mut pending = self.queued_outputs.clone();

        for (position, step) in job.steps().iter().enumerate() {
            let at = StepRef::new(position, step);
            let command = step.render();

            let decision = {
                let inspector = Inspector::new(&self.config, &pending);
                match inspector.evaluate(&at, step)? {
                    Staleness::UpToDate => None,
                    Staleness::Stale(reason) => Some((reason, inspector.missing_input(&at, step)?)),
                }
            };

            let reason = match decision {
                None => {
                    info!(step = %at, "outputs up to date, skipping");
                    self.note(job.name(), &at, &format!("skipped (up to date): {command}"));
                    report.steps.push((at, StepOutcome::Skipped));
                    continue;
                }
                Some((_, Some(path))) => {
                    error!(step = %at, path = %path.display(), %command, "input does not exist");
                    self.note(job.name(), &at, &format!("missing input {}", path.display()));
                    return Err(RunError::MissingInput { step: at, path });
                }
                Some((reason, None)) => reason,
            };

            if self.config.dry_run {
                info!(step = %at, %reason, %command, "would run");
                self.note(job.name(), &at, &format!("would run ({reason}): {command}"));
                pending.extend(step.outputs().iter().map(|p| self.config.resolve(p)));
                report.steps.push((at, StepOutcome::WouldRun { reason }));
                continue;
            }

            info!(step = %at, %reason, %command, "running");
            self.note(job.name(), &at, &format!("running ({reason}): {command}"));
            let trace = match self.execute(&at, step, &command).await {
                Ok(trace) => trace,
                Err(e) => {
                    error!(step = %at, error = %e, "step failed, aborting job");
                    self.note(job.name(), &at, &format!("failed: {e}"));
                    return Err(e);
                }
            };

            let elapsed = format_elapsed_ms(trace.duration.as_millis() as u64);
            info!(step = %at, duration = %elapsed, "finished");
            self.note(job.name(), &at, &format!("finished in {elapsed}"));
            report.steps.push((at, StepOutcome::Ran { reason, trace }));
        }

        info!(
            job = job.name(),
            ran = report.ran(),
            skipped = report.skipped(),
            "job complete"
        );
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Parallel queue
    // -----------------------------------------------------------------------

    /// Run every queued step concurrently and wait for all of them.
    ///
    /// Queued steps are not up-to-date checked. In a dry run their outputs
    /// count as pending for every later [`run`](Self::run). A failing step does not stop
    /// its siblings; the batch fails if any step failed. The queue is empty
    /// afterwards either way.
    pub async fn run_queued(&mut self) -> Result<BatchReport, RunError> {
        let queue = std::mem::take(&mut self.queue);
        let total = queue.len();
        if total == 0 {
            debug!("parallel queue is empty");
            return Ok(BatchReport::default());
        }

        let limit = self.config.effective_parallelism(total);
        info!(total, parallelism = limit, dry_run = self.config.dry_run, "running queued steps");

        let semaphore = Arc::new(Semaphore::new(limit));
        let mut handles = Vec::with_capacity(total);
        for (position, step) in queue.into_iter().enumerate() {
            let at = StepRef::new(position, &step);
            let command = step.render();
            self.note(QUEUE_LOG, &at, &format!("queued: {command}"));
            if self.config.dry_run {
                self.queued_outputs.extend(step.outputs().iter().map(|p| self.config.resolve(p)));
            }

            let config = Arc::clone(&self.config);
            let semaphore = Arc::clone(&semaphore);
            let task_at = at.clone();
            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.map_err(|e| RunError::Aborted {
                    step: task_at.clone(),
                    message: e.to_string(),
                })?;
                if config.dry_run {
                    info!(step = %task_at, %command, "would run");
                    return Ok(None);
                }
                info!(step = %task_at, %command, "starting");
                execute_step(&config, &task_at, &step, &command).await.map(Some)
            });
            handles.push((at, handle));
        }

        let mut report = BatchReport::default();
        for (at, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(RunError::Aborted { step: at.clone(), message: e.to_string() }),
            };
            match &result {
                Ok(Some(trace)) => {
                    let elapsed = format_elapsed_ms(trace.duration.as_millis() as u64);
                    info!(step = %at, duration = %elapsed, "finished");
                    self.note(QUEUE_LOG, &at, &format!("finished in {elapsed}"));
                }
                Ok(None) => self.note(QUEUE_LOG, &at, "would run"),
                Err(e) => {
                    error!(step = %at, error = %e, "queued step failed");
                    self.note(QUEUE_LOG, &at, &format!("failed: {e}"));
                }
            }
            report.items.push(BatchItem { step: at, result });
        }

        let failed = report.failed().count();
        if failed > 0 {
            error!(failed, total, "parallel batch failed");
            return Err(RunError::BatchFailed { failed, total, report });
        }
        Ok(report)
    }

    async fn execute(&self, at: &StepRef, step: &Step, command: &str) -> Result<StepTrace, RunError> {
        execute_step(&self.config, at, step, command).await
    }

    fn note(&self, job: &str, at: &StepRef, message: &str) {
        if let Some(log) = &self.log {
            log.append(job, &at.to_string(), message);
        }
    }
}

/// Spawn one step, then require a zero exit and every declared output.
async fn execute_step(
    config: &RunnerConfig,
    at: &StepRef,
    step: &Step,
    command: &str,
) -> Result<StepTrace, RunError> {
    let trace = run_shell(config, at, command).await?;
    if trace.exit_code != 0 {
        return Err(RunError::StepFailed {
            step: at.clone(),
            command: command.to_string(),
            exit_code: trace.exit_code,
        });
    }
    for output in step.outputs() {
        let resolved = config.resolve(output);
        let exists = modified(&resolved)
            .map_err(|source| RunError::Stat { step: at.clone(), path: resolved.clone(), source })?
            .is_some();
        if !exists {
            return Err(RunError::MissingOutput {
                step: at.clone(),
                command: command.to_string(),
                path: output.clone(),
            });
        }
    }
    Ok(trace)
}

#[cfg(test)]
#[path = "runner_tests/mod.rs"]
mod tests;
