// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Missing tools or helper scripts exit with status 3.

use crate::prelude::*;

#[test]
fn missing_tools_are_listed() {
    let project = Project::complete();
    std::fs::remove_file(project.path().join("bin/Rscript")).unwrap();
    std::fs::remove_file(project.path().join("bin/tabix")).unwrap();

    project
        .cv_with_inputs()
        .fails_with(3)
        .stderr_has("command(s) not found on PATH: Rscript, tabix");
}

#[test]
fn vt_is_only_needed_for_exac() {
    let project = Project::complete();
    std::fs::remove_file(project.path().join("bin/vt")).unwrap();

    project.cv_with_inputs().args(&["-n"]).passes();
    project
        .cv_with_inputs()
        .args(&["-n", "-E", "ref/exac.vcf.gz"])
        .fails_with(3)
        .stderr_has("vt");
}

#[test]
fn missing_helper_script() {
    let project = Project::complete();
    std::fs::remove_file(project.path().join("work/dedup_clinvar.py")).unwrap();

    project.cv_with_inputs().fails_with(3).stderr_has("dedup_clinvar.py");
}

#[test]
fn python_program_is_configurable() {
    let project = Project::complete();
    project.cv_with_inputs().args(&["-n", "--python", "python3"]).fails_with(3).stderr_has("python3");
}
