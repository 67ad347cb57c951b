// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::CommandFactory;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("cv").chain(args.iter().copied()))
}

#[test]
fn command_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn short_flags() {
    let cli = parse(&[
        "-R", "hg38.fa", "-A", "GRCh38", "-E", "exac.vcf.gz", "-X", "release.xml.gz", "-S",
        "summary.txt.gz", "-c", "cv.toml", "-f", "-n", "-j", "4", "-vv",
    ])
    .unwrap();

    assert_eq!(cli.reference_genome, Some(PathBuf::from("hg38.fa")));
    assert_eq!(cli.assembly, Some(Assembly::Grch38));
    assert_eq!(cli.exac_sites_vcf, Some(PathBuf::from("exac.vcf.gz")));
    assert_eq!(cli.clinvar_xml, Some(PathBuf::from("release.xml.gz")));
    assert_eq!(cli.clinvar_variant_summary_table, Some(PathBuf::from("summary.txt.gz")));
    assert_eq!(cli.config, Some(PathBuf::from("cv.toml")));
    assert!(cli.force);
    assert!(cli.dry_run);
    assert_eq!(cli.jobs, Some(4));
    assert_eq!(cli.verbose, 2);
}

#[test]
fn long_flags() {
    let cli = parse(&[
        "--reference-genome", "hg19.fa", "--assembly", "GRCh37", "--work-dir", "build",
        "--output-dir", "out", "--scripts-dir", "scripts", "--python", "python3",
    ])
    .unwrap();

    assert_eq!(cli.assembly, Some(Assembly::Grch37));
    assert_eq!(cli.work_dir, Some(PathBuf::from("build")));
    assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
    assert_eq!(cli.scripts_dir, Some(PathBuf::from("scripts")));
    assert_eq!(cli.python.as_deref(), Some("python3"));
    assert!(!cli.force);
}

#[yare::parameterized(
    lowercase = { "grch38" },
    hg_name   = { "hg38" },
)]
fn unknown_assembly_is_rejected(value: &str) {
    assert!(parse(&["-A", value]).is_err());
}

#[test]
fn assembly_display_matches_flag_value() {
    assert_eq!(Assembly::Grch37.to_string(), "GRCh37");
    assert_eq!(Assembly::Grch38.to_string(), "GRCh38");
}
