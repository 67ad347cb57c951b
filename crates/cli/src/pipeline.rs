// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The ClinVar build: release downloads followed by the main job.

use std::path::{Path, PathBuf};

use cv_adapters::{FtpMdtmClient, RemoteMtime, RemoteResource};
use cv_core::{format_epoch, Job, PipelineError, QueryOutcome, Step, StepBuilder, StepError};
use cv_engine::{FreshnessChecker, JobRunner};
use tracing::{info, warn};

use crate::config::{with_suffix, Config};

pub const XML_REMOTE_PATH: &str = "/pub/clinvar/xml/ClinVarFullRelease_00-latest.xml.gz";
pub const SUMMARY_REMOTE_PATH: &str = "/pub/clinvar/tab_delimited/variant_summary.txt.gz";

const NORMALIZE_URL: &str =
    "https://raw.githubusercontent.com/ericminikel/minimal_representation/master/normalize.py";

/// Rows kept in the uncompressed example files.
const EXAMPLE_ROWS: usize = 750;

/// File names in the working directory.
pub mod files {
    pub const XML: &str = "ClinVarFullRelease_00-latest.xml.gz";
    pub const SUMMARY: &str = "variant_summary.txt.gz";
    pub const RAW: &str = "clinvar_table_raw.tsv";
    pub const NORMALIZED: &str = "clinvar_table_normalized.tsv";
    pub const COMBINED: &str = "clinvar_combined.tsv";
    pub const SORTED: &str = "clinvar_combined_sorted.tsv";
    pub const TSV: &str = "clinvar.tsv";
    pub const TSV_GZ: &str = "clinvar.tsv.gz";
    pub const TSV_TBI: &str = "clinvar.tsv.gz.tbi";
    pub const VCF_GZ: &str = "clinvar.vcf.gz";
    pub const VCF_TBI: &str = "clinvar.vcf.gz.tbi";
    pub const EXAC_TSV_GZ: &str = "clinvar_with_exac.tsv.gz";
    pub const EXAC_TSV_TBI: &str = "clinvar_with_exac.tsv.gz.tbi";
    pub const STATS: &str = "clinvar_stats.txt";
    pub const EXAMPLE_VCF: &str = "clinvar_example_750_rows.vcf";
    pub const EXAMPLE_TSV: &str = "clinvar_example_750_rows.tsv";
    pub const EXAMPLE_EXAC_TSV: &str = "clinvar_with_exac_example_750_rows.tsv";
}

/// Per-column value counts over the final table. Runs in the working dir.
const STATS_SCRIPT: &str = r#"{
  echo "Columns: $( (set +o pipefail; gunzip -c clinvar.tsv.gz | head -n 1) | awk -F'\t' '{for (i = 1; i <= NF; i++) printf "%s%d: %s", (i > 1 ? ", " : ""), i, $i}')"
  echo ================
  echo "Total Rows: $(gunzip -c clinvar.tsv.gz | tail -n +2 | wc -l)"
  for i in 8 9 10 11 12 13 19 20 21 22 23; do
    echo ================
    (set +o pipefail; gunzip -c clinvar.tsv.gz | head -n 1) | cut -f $i
    gunzip -c clinvar.tsv.gz | tail -n +2 | cut -f $i | tr ';' '\n' | sort | uniq -c | sort -r -n
  done
} > clinvar_stats.txt"#;

/// A release file to refresh from the FTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub resource: RemoteResource,
    pub local: PathBuf,
}

impl Download {
    /// `wget <url> -O <local>`, declaring the local file as its output.
    pub fn step(&self) -> Result<Step, StepError> {
        let name = self.local.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        Step::builder()
            .label(format!("fetch {name}"))
            .arg("wget")
            .arg(self.resource.url())
            .arg("-O")
            .output(&self.local)
            .build()
    }
}

/// Where the two ClinVar release files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub clinvar_xml: PathBuf,
    pub variant_summary: PathBuf,
    /// Files not given locally, to be checked against the FTP server.
    pub downloads: Vec<Download>,
}

impl Sources {
    pub fn resolve(config: &Config) -> Self {
        let mut downloads = Vec::new();
        let mut pick = |given: &Option<PathBuf>, remote_path: &str, name: &str| match given {
            Some(path) => path.clone(),
            None => {
                let local = config.work_dir.join(name);
                downloads.push(Download {
                    resource: RemoteResource::new(config.ftp_host.as_str(), remote_path),
                    local: local.clone(),
                });
                local
            }
        };
        let clinvar_xml = pick(&config.clinvar_xml, XML_REMOTE_PATH, files::XML);
        let variant_summary = pick(&config.variant_summary, SUMMARY_REMOTE_PATH, files::SUMMARY);
        Self { clinvar_xml, variant_summary, downloads }
    }
}

/// Outcome of checking the release files against the server.
#[derive(Debug, Default)]
pub struct DownloadPlan {
    pub queued: usize,
    /// One `NetworkDegraded` error per failed check.
    pub degraded: Vec<PipelineError>,
}

/// Queue a download for every release file newer on the server than locally.
///
/// A failed check queues nothing and is recorded as degraded.
pub async fn queue_downloads<R: RemoteMtime>(
    runner: &mut JobRunner,
    checker: &FreshnessChecker<R>,
    downloads: &[Download],
) -> Result<DownloadPlan, PipelineError> {
    let mut plan = DownloadPlan::default();
    for download in downloads {
        info!(resource = %download.resource, "checking for new ClinVar release");
        let freshness = checker.check(&download.resource, &download.local).await;
        if freshness.needs_refresh {
            runner.add_parallel(download.step().map_err(PipelineError::step_execution)?);
            plan.queued += 1;
        } else if let QueryOutcome::Failed(reason) = &freshness.query {
            let degraded = PipelineError::NetworkDegraded(format!("{}: {reason}", download.resource));
            if download.local.exists() {
                warn!(kind = %degraded.kind(), error = %degraded, local = %download.local.display(), "keeping local copy");
            } else {
                warn!(kind = %degraded.kind(), error = %degraded, local = %download.local.display(), "no local copy to fall back on");
            }
            plan.degraded.push(degraded);
        } else {
            info!(
                url = %download.resource.url(),
                remote_modified = %format_epoch(freshness.remote_time),
                "local copy is up to date"
            );
        }
    }
    Ok(plan)
}

fn python(config: &Config, script: &str) -> StepBuilder {
    Step::builder().arg(&config.python).arg("-u").input(config.scripts_dir.join(script))
}

/// `cp <files> <output_dir>/`, declaring the published copies as outputs.
fn publish(config: &Config, label: &str, names: &[&str]) -> StepBuilder {
    let mut builder = Step::builder().label(label).arg("cp");
    for name in names {
        builder = builder.input(*name);
    }
    builder
        .arg(format!("{}/", config.output_dir.display()))
        .extra_outputs(names.iter().map(|name| config.output_dir.join(name)))
}

fn tabix_table(label: &str, table: &str) -> StepBuilder {
    Step::builder()
        .label(label)
        .raw("tabix -S 1 -s 1 -b 2 -e 2")
        .input(table)
        .extra_output(with_suffix(Path::new(table), ".tbi"))
}

/// `<exac>.vcf.gz` → `<exac>.normalized.vcf.gz`
pub fn normalized_exac_name(exac: &Path) -> String {
    let name = exac.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    let stem = name.split(".vcf").next().unwrap_or_default();
    format!("{stem}.normalized.vcf.gz")
}

/// Every step from the release files to the published tables.
pub fn main_job(config: &Config, sources: &Sources) -> Result<Job, StepError> {
    let mut job = Job::new("clinvar");
    let reference = config.reference_genome.as_path();

    // Coordinates, alleles, MeasureSet IDs and PubMed IDs from the XML.
    job.push(
        python(config, "parse_clinvar_xml.py")
            .label("parse-xml")
            .arg("-x")
            .input(&sources.clinvar_xml)
            .arg("-o")
            .output(files::RAW)
            .arg("-a")
            .arg(config.assembly.to_string())
            .build()?,
    );

    // Minimal representation and left-alignment.
    job.push(Step::builder().label("fetch-normalize").arg("wget").arg("-N").arg(NORMALIZE_URL).build()?);
    job.push(
        Step::builder()
            .label("normalize")
            .arg(&config.python)
            .arg("-u")
            .arg("normalize.py")
            .arg("-R")
            .input(reference)
            .raw("<")
            .input(files::RAW)
            .raw(">")
            .output(files::NORMALIZED)
            .build()?,
    );

    job.push(
        Step::builder()
            .label("join")
            .arg("Rscript")
            .input(config.scripts_dir.join("join_data.R"))
            .input(&sources.variant_summary)
            .extra_input(files::NORMALIZED)
            .extra_output(files::COMBINED)
            .build()?,
    );

    // Header first, then chromosomes 1-22 numerically, then X, Y and M.
    job.push(
        Step::builder()
            .label("sort")
            .raw("(head -n 1")
            .input(files::COMBINED)
            .raw(">")
            .output(files::SORTED)
            .raw(") && (tail -n +2")
            .input(files::COMBINED)
            .raw("| { grep -v '^[XYM]' || true; } | sort -k1,1n -k2,2n -k3,3 -k4,4 >>")
            .output(files::SORTED)
            .raw(") && (tail -n +2")
            .input(files::COMBINED)
            .raw("| { grep '^[XYM]' || true; } | sort -k1,1 -k2,2n -k3,3 -k4,4 >>")
            .output(files::SORTED)
            .raw(")")
            .build()?,
    );

    job.push(
        python(config, "dedup_clinvar.py")
            .label("dedup")
            .raw("<")
            .input(files::SORTED)
            .raw("| tee")
            .output(files::TSV)
            .raw("| bgzip -c >")
            .output(files::TSV_GZ)
            .build()?,
    );
    job.push(tabix_table("index-tsv", files::TSV_GZ).build()?);
    job.push(publish(config, "publish-tsv", &[files::TSV_GZ, files::TSV_TBI]).build()?);

    job.push(
        python(config, "clinvar_table_to_vcf.py")
            .label("to-vcf")
            .input(files::TSV)
            .raw("| bgzip -c >")
            .output(files::VCF_GZ)
            .build()?,
    );
    job.push(
        Step::builder()
            .label("index-vcf")
            .arg("tabix")
            .input(files::VCF_GZ)
            .extra_output(files::VCF_TBI)
            .build()?,
    );
    job.push(publish(config, "publish-vcf", &[files::VCF_GZ, files::VCF_TBI]).build()?);

    if let Some(exac) = &config.exac_sites_vcf {
        let normalized = normalized_exac_name(exac);
        job.push(
            Step::builder()
                .label("normalize-exac")
                .raw("vt decompose -s")
                .input(exac)
                .raw("| vt normalize -r")
                .input(reference)
                .raw("- | bgzip -c >")
                .output(&normalized)
                .build()?,
        );
        job.push(
            Step::builder()
                .label("index-exac")
                .arg("tabix")
                .input(&normalized)
                .extra_output(format!("{normalized}.tbi"))
                .build()?,
        );
        job.push(
            python(config, "add_exac_fields.py")
                .label("add-exac")
                .arg("-i")
                .input(files::TSV)
                .arg("-e")
                .input(&normalized)
                .raw("| bgzip -c >")
                .output(files::EXAC_TSV_GZ)
                .build()?,
        );
        job.push(tabix_table("index-exac-tsv", files::EXAC_TSV_GZ).build()?);
        job.push(
            publish(config, "publish-exac", &[files::EXAC_TSV_GZ, files::EXAC_TSV_TBI]).build()?,
        );
    }

    // Uncompressed previews so typical values can be browsed online.
    let mut previews = vec![(files::VCF_GZ, files::EXAMPLE_VCF), (files::TSV_GZ, files::EXAMPLE_TSV)];
    if config.wants_exac() {
        previews.push((files::EXAC_TSV_GZ, files::EXAMPLE_EXAC_TSV));
    }
    let mut examples = Step::builder().label("examples");
    for (position, (table, example)) in previews.into_iter().enumerate() {
        if position > 0 {
            examples = examples.raw("&&");
        }
        examples = examples
            .raw("(set +o pipefail; gunzip -c")
            .input(table)
            .raw(format!("| head -n {EXAMPLE_ROWS}) >"))
            .output(config.output_dir.join(example));
    }
    job.push(examples.build()?);

    job.push(
        Step::builder()
            .label("stats")
            .raw(STATS_SCRIPT)
            .extra_input(files::TSV_GZ)
            .extra_output(files::STATS)
            .build()?,
    );
    job.push(
        Step::builder()
            .label("publish-stats")
            .arg("cp")
            .input(files::STATS)
            .output(config.output_dir.join(files::STATS))
            .build()?,
    );

    Ok(job)
}

/// Refresh the release files, then bring every table up to date.
pub async fn run(config: &Config) -> Result<(), PipelineError> {
    let mut runner = JobRunner::new(config.runner_config());
    let sources = Sources::resolve(config);

    if !sources.downloads.is_empty() {
        let client = FtpMdtmClient::new().timeout(config.ftp_timeout);
        let checker = FreshnessChecker::new(client);
        let plan = queue_downloads(&mut runner, &checker, &sources.downloads).await?;
        if !plan.degraded.is_empty() {
            warn!(failed = plan.degraded.len(), "continuing without a release check");
        }
        if plan.queued > 0 {
            let batch = runner.run_queued().await?;
            info!(downloaded = batch.succeeded().count(), "release files refreshed");
        }
    }

    let job = main_job(config, &sources).map_err(PipelineError::step_execution)?;
    let report = runner.run(&job).await?;
    if config.dry_run {
        info!(would_run = report.steps.len() - report.skipped(), skipped = report.skipped(), "dry run complete");
    } else {
        info!(
            ran = report.ran(),
            skipped = report.skipped(),
            output_dir = %config.output_dir.display(),
            "ClinVar tables are up to date"
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
