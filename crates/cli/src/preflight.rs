// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment checks run before any step: external tools and helper scripts.

use std::path::PathBuf;

use cv_adapters::ToolLocator;
use cv_core::PipelineError;
use tracing::debug;

use crate::config::Config;

/// Helper scripts every run needs.
pub const HELPER_SCRIPTS: &[&str] = &[
    "parse_clinvar_xml.py",
    "join_data.R",
    "dedup_clinvar.py",
    "clinvar_table_to_vcf.py",
];

/// Extra helper script when ExAC fields are requested.
pub const EXAC_SCRIPT: &str = "add_exac_fields.py";

/// Programs that must be on `PATH`, in check order.
pub fn required_tools(config: &Config) -> Vec<&str> {
    let mut tools = vec!["bash", "wget", config.python.as_str(), "Rscript", "bgzip", "tabix"];
    if config.wants_exac() {
        tools.push("vt");
    }
    tools
}

/// Helper scripts the pipeline reads from the scripts directory.
pub fn helper_scripts(config: &Config) -> Vec<PathBuf> {
    let mut names = HELPER_SCRIPTS.to_vec();
    if config.wants_exac() {
        names.push(EXAC_SCRIPT);
    }
    names.into_iter().map(|name| config.scripts_dir.join(name)).collect()
}

pub fn check_tools(locator: &ToolLocator, config: &Config) -> Result<(), PipelineError> {
    let required = required_tools(config);
    let missing = locator.missing(required.iter().copied());
    if !missing.is_empty() {
        return Err(PipelineError::Environment(format!(
            "command(s) not found on PATH: {}",
            missing.join(", ")
        )));
    }
    debug!(tools = ?required, "all required tools found");
    Ok(())
}

pub fn check_scripts(config: &Config) -> Result<(), PipelineError> {
    let missing: Vec<String> = helper_scripts(config)
        .into_iter()
        .filter(|path| !path.is_file())
        .map(|path| path.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::Environment(format!(
            "helper script(s) not found: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

/// All environment checks against the process `PATH`.
pub fn check(config: &Config) -> Result<(), PipelineError> {
    check_tools(&ToolLocator::from_env(), config)?;
    check_scripts(config)
}

#[cfg(test)]
#[path = "preflight_tests.rs"]
mod tests;
