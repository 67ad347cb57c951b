// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running the build against stubbed tools.

use crate::prelude::*;

#[test]
fn dry_run_spawns_nothing() {
    let project = Project::complete();
    project.stub("wget", "touch wget-ran");

    project
        .cv_with_inputs()
        .args(&["--dry-run"])
        .passes()
        .stderr_has("would run")
        .stderr_has("parse-xml")
        .stderr_has("publish-stats");

    assert!(!project.exists("work/wget-ran"));
    assert!(!project.exists("work/clinvar_table_raw.tsv"));
    assert!(!project.exists("out/clinvar_stats.txt"));
}

#[test]
fn failing_step_exits_with_one_and_stops() {
    let project = Project::complete();
    if !project.link_host_tool("bash") {
        return;
    }
    project.stub("python", "exit 4");
    project.stub("wget", "touch wget-ran");

    project
        .cv_with_inputs()
        .fails_with(1)
        .stderr_has("step 1 (parse-xml)")
        .stderr_has("exit code 4");

    assert!(!project.exists("work/wget-ran"));
}

#[test]
fn run_log_records_decisions() {
    let project = Project::complete();

    project.cv_with_inputs().args(&["-n", "--log-dir", "logs"]).passes();

    let log = std::fs::read_to_string(project.path().join("logs/clinvar.log")).unwrap();
    assert!(log.contains("[step 1 (parse-xml)] would run"), "log was:\n{log}");
}
