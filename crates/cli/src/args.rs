// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line flags.
//!
//! Every input is optional here: values may also come from the `--config`
//! file, and the merged result is validated in [`crate::config`].

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde::Deserialize;

/// Genome assembly the ClinVar coordinates are extracted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum Assembly {
    #[value(name = "GRCh37")]
    #[serde(rename = "GRCh37")]
    Grch37,
    #[value(name = "GRCh38")]
    #[serde(rename = "GRCh38")]
    Grch38,
}

cv_core::simple_display! {
    Assembly {
        Grch37 => "GRCh37",
        Grch38 => "GRCh38",
    }
}

#[derive(Debug, Default, Parser)]
#[command(
    name = "cv",
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")),
    about = "Build the ClinVar variant tables, re-running only what changed",
    styles = crate::color::styles(),
)]
pub struct Cli {
    /// hg19 or hg38 .fa genome reference file
    #[arg(short = 'R', long, value_name = "FILE")]
    pub reference_genome: Option<PathBuf>,

    /// Genome assembly
    #[arg(short = 'A', long, value_enum)]
    pub assembly: Option<Assembly>,

    /// ExAC sites VCF (tabix-indexed); adds a table with ExAC fields
    #[arg(short = 'E', long, value_name = "FILE")]
    pub exac_sites_vcf: Option<PathBuf>,

    /// Local ClinVarFullRelease .xml.gz instead of the latest from NCBI
    #[arg(short = 'X', long, value_name = "FILE.gz")]
    pub clinvar_xml: Option<PathBuf>,

    /// Local variant_summary .txt.gz instead of the latest from NCBI
    #[arg(short = 'S', long, value_name = "FILE.gz")]
    pub clinvar_variant_summary_table: Option<PathBuf>,

    /// TOML file with defaults for any of these options
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for downloads and intermediate files [default: .]
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Directory receiving the published tables [default: <work-dir>/..]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory holding the helper scripts [default: <work-dir>]
    #[arg(long, value_name = "DIR")]
    pub scripts_dir: Option<PathBuf>,

    /// Directory for per-job run logs
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Python interpreter for the helper scripts [default: python]
    #[arg(long, value_name = "PROG")]
    pub python: Option<String>,

    /// Re-run every step, even if its outputs are up to date
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Log what would run without running anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Maximum number of concurrent downloads
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// More logging (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
