// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults() {
    let config = RunnerConfig::default();
    assert_eq!(config.cwd, PathBuf::from("."));
    assert_eq!(config.shell, "bash");
    assert!(config.pipefail);
    assert!(!config.force);
    assert!(!config.dry_run);
    assert!(config.definition_source.is_none());
    assert!(config.log_dir.is_none());
}

#[test]
fn setters_chain() {
    let config = RunnerConfig::new("/work")
        .shell("sh")
        .pipefail(false)
        .force(true)
        .dry_run(true)
        .parallelism(4)
        .definition_source("/usr/bin/cv")
        .log_dir("/work/logs");

    assert_eq!(config.cwd, PathBuf::from("/work"));
    assert_eq!(config.shell, "sh");
    assert!(!config.pipefail);
    assert!(config.force);
    assert!(config.dry_run);
    assert_eq!(config.parallelism, Some(4));
    assert_eq!(config.definition_source, Some(PathBuf::from("/usr/bin/cv")));
    assert_eq!(config.log_dir, Some(PathBuf::from("/work/logs")));
}

#[yare::parameterized(
    relative = { "clinvar.tsv",    "/work/clinvar.tsv" },
    parent   = { "../clinvar.tsv", "/work/../clinvar.tsv" },
    absolute = { "/ref/hg38.fa",   "/ref/hg38.fa" },
)]
fn resolve_paths(path: &str, expected: &str) {
    let config = RunnerConfig::new("/work");
    assert_eq!(config.resolve(Path::new(path)), PathBuf::from(expected));
}

#[yare::parameterized(
    capped_by_queue = { Some(8), 3, 3 },
    capped_by_limit = { Some(2), 5, 2 },
    empty_queue     = { Some(4), 0, 1 },
    zero_limit      = { Some(0), 3, 1 },
)]
fn parallelism(limit: Option<usize>, queued: usize, expected: usize) {
    let config = RunnerConfig { parallelism: limit, ..RunnerConfig::default() };
    assert_eq!(config.effective_parallelism(queued), expected);
}

#[test]
fn default_parallelism_is_bounded_by_queue() {
    let config = RunnerConfig::default();
    let n = config.effective_parallelism(2);
    assert!((1..=2).contains(&n));
}

#[yare::parameterized(
    with_pipefail    = { true,  "set -o pipefail\ntrue" },
    without_pipefail = { false, "true" },
)]
fn script_prefix(pipefail: bool, expected: &str) {
    let config = RunnerConfig::default().pipefail(pipefail);
    assert_eq!(config.script("true"), expected);
}
