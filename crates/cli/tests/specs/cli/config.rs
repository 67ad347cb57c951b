// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration errors exit with status 2 before any work starts.

use crate::prelude::*;

#[test]
fn no_arguments_requires_reference_genome() {
    let project = Project::new();
    project.cv().fails_with(2).stderr_has("--reference-genome (-R) is required");
}

#[test]
fn missing_assembly() {
    let project = Project::complete();
    project.cv().args(&["-R", "ref/hg38.fa"]).fails_with(2).stderr_has("--assembly (-A) is required");
}

#[test]
fn unknown_assembly_is_rejected_by_the_parser() {
    let project = Project::complete();
    project.cv().args(&["-R", "ref/hg38.fa", "-A", "hg38"]).fails_with(2).stderr_has("hg38");
}

#[test]
fn missing_reference_file() {
    let project = Project::complete();
    project
        .cv()
        .args(&["-R", "ref/absent.fa", "-A", "GRCh37"])
        .fails_with(2)
        .stderr_has("genome reference: file not found");
}

#[test]
fn exac_vcf_needs_a_tabix_index() {
    let project = Project::complete();
    project.file("ref/unindexed.vcf.gz", "");
    project
        .cv_with_inputs()
        .args(&["-E", "ref/unindexed.vcf.gz"])
        .fails_with(2)
        .stderr_has("tabix index not found");
}

#[test]
fn prefetched_release_must_be_gzipped() {
    let project = Project::complete();
    project.file("data/release.xml", "");
    project
        .cv()
        .args(&["-R", "ref/hg38.fa", "-A", "GRCh38", "-X", "data/release.xml"])
        .fails_with(2)
        .stderr_has("expected to be gzipped");
}

#[test]
fn malformed_config_file() {
    let project = Project::complete();
    project.file("cv.toml", "assembly = GRCh38\n");
    project.cv().args(&["-c", "cv.toml"]).fails_with(2).stderr_has("invalid config file");
}

#[test]
fn config_file_supplies_required_values() {
    let project = Project::complete();
    project.file(
        "cv.toml",
        r#"
reference_genome = "ref/hg38.fa"
assembly = "GRCh38"
clinvar_xml = "data/ClinVarFullRelease.xml.gz"
clinvar_variant_summary_table = "data/variant_summary.txt.gz"
work_dir = "work"
output_dir = "out"
"#,
    );
    project.cv().args(&["-c", "cv.toml", "--dry-run"]).passes();
}
