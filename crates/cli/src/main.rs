// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cv: ClinVar pipeline driver

mod args;
mod color;
mod config;
mod env;
mod exit_error;
mod pipeline;
mod preflight;

use std::process::ExitCode;

use clap::Parser;
use cv_core::PipelineError;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;
use crate::config::Config;
use crate::exit_error::ExitError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(exit) = e.downcast_ref::<ExitError>() {
                eprintln!("error: {}", exit.message);
                return ExitCode::from(u8::try_from(exit.code).unwrap_or(1));
            }
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli).map_err(|e| ExitError::from(PipelineError::from(e)))?;
    info!(
        assembly = %config.assembly,
        work_dir = %config.work_dir.display(),
        output_dir = %config.output_dir.display(),
        force = config.force,
        dry_run = config.dry_run,
        "starting ClinVar build"
    );

    preflight::check(&config).map_err(ExitError::from)?;
    pipeline::run(&config).await.map_err(ExitError::from)?;
    Ok(())
}

/// Log to stderr. `CV_LOG` takes a full filter; otherwise `-v` raises the level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = env::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(color::should_colorize())
        .init();
}
