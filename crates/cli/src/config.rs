// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver configuration: command-line flags merged over an optional TOML
//! file, validated once before any work starts.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use cv_core::PipelineError;
use cv_engine::RunnerConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::args::{Assembly, Cli};
use crate::env;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{what}: file not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("{what} expected to be gzipped: {}", .path.display())]
    NotGzipped { what: &'static str, path: PathBuf },

    #[error("ExAC sites vcf: tabix index not found: {}", .path.display())]
    MissingIndex { path: PathBuf },

    #[error("{what} is not a directory: {}", .path.display())]
    NotADirectory { what: &'static str, path: PathBuf },

    #[error("--jobs must be at least 1")]
    ZeroJobs,

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

impl From<ConfigError> for PipelineError {
    fn from(e: ConfigError) -> Self {
        PipelineError::Configuration(e.to_string())
    }
}

/// Defaults read from the `--config` TOML file. Keys mirror the long flags
/// with underscores; relative paths are taken from the file's directory.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub reference_genome: Option<PathBuf>,
    pub assembly: Option<Assembly>,
    pub exac_sites_vcf: Option<PathBuf>,
    pub clinvar_xml: Option<PathBuf>,
    pub clinvar_variant_summary_table: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub scripts_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub python: Option<String>,
    pub force: Option<bool>,
    pub jobs: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}

/// Fully resolved settings for one invocation. Every path is absolute.
#[derive(Debug, Clone)]
pub struct Config {
    pub reference_genome: PathBuf,
    pub assembly: Assembly,
    pub exac_sites_vcf: Option<PathBuf>,
    /// Pre-fetched release XML; `None` means "latest from the FTP server".
    pub clinvar_xml: Option<PathBuf>,
    /// Pre-fetched variant summary; `None` means "latest from the FTP server".
    pub variant_summary: Option<PathBuf>,
    pub work_dir: PathBuf,
    pub output_dir: PathBuf,
    pub scripts_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub python: String,
    pub force: bool,
    pub dry_run: bool,
    pub jobs: Option<usize>,
    pub ftp_host: String,
    pub ftp_timeout: Duration,
    /// File whose modification makes every step stale (the driver binary).
    pub definition_source: Option<PathBuf>,
}

impl Config {
    /// Build from flags, the config file they name, and the environment.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        let (file, file_dir) = match &cli.config {
            Some(path) => {
                let path = absolute(&cwd, path);
                let file = FileConfig::load(&path)?;
                (file, path.parent().map(Path::to_path_buf))
            }
            None => (FileConfig::default(), None),
        };

        let mut config = Self::merge(cli, file, &cwd, file_dir.as_deref())?;
        config.ftp_host = env::ftp_host();
        config.ftp_timeout = env::ftp_timeout();
        if config.jobs.is_none() {
            config.jobs = env::jobs();
        }
        config.definition_source = std::env::current_exe().ok();
        config.validate()?;
        Ok(config)
    }

    /// Merge flags over file values. Flag paths resolve against `cwd`, file
    /// paths against `file_dir` (or `cwd` when there is no file).
    pub fn merge(
        cli: &Cli,
        file: FileConfig,
        cwd: &Path,
        file_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let file_base = file_dir.unwrap_or(cwd);
        let pick = |flag: &Option<PathBuf>, value: Option<PathBuf>| -> Option<PathBuf> {
            flag.as_deref()
                .map(|p| absolute(cwd, p))
                .or_else(|| value.map(|p| absolute(file_base, &p)))
        };

        let reference_genome = pick(&cli.reference_genome, file.reference_genome)
            .ok_or(ConfigError::Missing("--reference-genome (-R)"))?;
        let assembly = cli.assembly.or(file.assembly).ok_or(ConfigError::Missing("--assembly (-A)"))?;
        let work_dir = pick(&cli.work_dir, file.work_dir).unwrap_or_else(|| absolute(cwd, Path::new(".")));
        let output_dir = pick(&cli.output_dir, file.output_dir)
            .unwrap_or_else(|| work_dir.parent().map_or_else(|| work_dir.clone(), Path::to_path_buf));
        let scripts_dir = pick(&cli.scripts_dir, file.scripts_dir).unwrap_or_else(|| work_dir.clone());

        Ok(Self {
            reference_genome,
            assembly,
            exac_sites_vcf: pick(&cli.exac_sites_vcf, file.exac_sites_vcf),
            clinvar_xml: pick(&cli.clinvar_xml, file.clinvar_xml),
            variant_summary: pick(
                &cli.clinvar_variant_summary_table,
                file.clinvar_variant_summary_table,
            ),
            log_dir: pick(&cli.log_dir, file.log_dir),
            python: cli.python.clone().or(file.python).unwrap_or_else(|| "python".to_string()),
            force: cli.force || file.force.unwrap_or(false),
            dry_run: cli.dry_run,
            jobs: cli.jobs.or(file.jobs),
            work_dir,
            output_dir,
            scripts_dir,
            ftp_host: env::DEFAULT_FTP_HOST.to_string(),
            ftp_timeout: Duration::from_secs(3),
            definition_source: None,
        })
    }

    /// Check that every referenced file and directory is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_file("genome reference", &self.reference_genome)?;

        if let Some(vcf) = &self.exac_sites_vcf {
            require_file("ExAC sites vcf", vcf)?;
            let index = with_suffix(vcf, ".tbi");
            if !index.is_file() {
                return Err(ConfigError::MissingIndex { path: index });
            }
        }
        if let Some(xml) = &self.clinvar_xml {
            require_gzipped_file("ClinVar XML", xml)?;
        }
        if let Some(summary) = &self.variant_summary {
            require_gzipped_file("ClinVar variant summary table", summary)?;
        }

        require_dir("working directory", &self.work_dir)?;
        require_dir("output directory", &self.output_dir)?;
        require_dir("scripts directory", &self.scripts_dir)?;

        if self.jobs == Some(0) {
            return Err(ConfigError::ZeroJobs);
        }
        Ok(())
    }

    pub fn wants_exac(&self) -> bool {
        self.exac_sites_vcf.is_some()
    }

    pub fn runner_config(&self) -> RunnerConfig {
        let mut runner = RunnerConfig::new(&self.work_dir).force(self.force).dry_run(self.dry_run);
        runner.definition_source = self.definition_source.clone();
        runner.log_dir = self.log_dir.clone();
        runner.parallelism = self.jobs;
        runner
    }
}

/// `base.join(path)` without `.` components.
fn absolute(base: &Path, path: &Path) -> PathBuf {
    base.join(path).components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

/// `path` with `suffix` appended to its file name (`a.vcf.gz` → `a.vcf.gz.tbi`).
pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn require_file(what: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::NotFound { what, path: path.to_path_buf() })
    }
}

fn require_gzipped_file(what: &'static str, path: &Path) -> Result<(), ConfigError> {
    require_file(what, path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(())
    } else {
        Err(ConfigError::NotGzipped { what, path: path.to_path_buf() })
    }
}

fn require_dir(what: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::NotADirectory { what, path: path.to_path_buf() })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
