// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::args::{Assembly, Cli};
use crate::config::FileConfig;
use cv_core::ErrorKind;
use std::path::Path;
use tempfile::TempDir;

fn config(dir: &Path, exac: bool) -> Config {
    let cli = Cli {
        reference_genome: Some("ref.fa".into()),
        assembly: Some(Assembly::Grch38),
        exac_sites_vcf: exac.then(|| "exac.vcf.gz".into()),
        python: Some("python3".into()),
        ..Cli::default()
    };
    Config::merge(&cli, FileConfig::default(), dir, None).unwrap()
}

/// A `bin` directory holding executable stubs for `tools`.
#[cfg(unix)]
fn bin_with(dir: &Path, tools: &[&str]) -> ToolLocator {
    use std::os::unix::fs::PermissionsExt;
    let bin = dir.join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    for tool in tools {
        let path = bin.join(tool);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    ToolLocator::new(bin.into_os_string())
}

#[test]
fn vt_is_only_required_for_exac() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        required_tools(&config(dir.path(), false)),
        vec!["bash", "wget", "python3", "Rscript", "bgzip", "tabix"]
    );
    assert_eq!(required_tools(&config(dir.path(), true)).last(), Some(&"vt"));
}

#[cfg(unix)]
#[test]
fn all_tools_present() {
    let dir = TempDir::new().unwrap();
    let locator = bin_with(dir.path(), &["bash", "wget", "python3", "Rscript", "bgzip", "tabix"]);
    check_tools(&locator, &config(dir.path(), false)).unwrap();
}

#[cfg(unix)]
#[test]
fn missing_tools_are_an_environment_error() {
    let dir = TempDir::new().unwrap();
    let locator = bin_with(dir.path(), &["bash", "wget", "python3", "bgzip"]);

    let err = check_tools(&locator, &config(dir.path(), true)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Environment);
    assert_eq!(err.kind().exit_code(), 3);
    assert!(err.to_string().ends_with("Rscript, tabix, vt"), "got {err}");
}

#[test]
fn helper_scripts_live_in_scripts_dir() {
    let dir = TempDir::new().unwrap();
    let scripts = helper_scripts(&config(dir.path(), true));
    assert_eq!(scripts.len(), 5);
    assert_eq!(scripts[0], dir.path().join("parse_clinvar_xml.py"));
    assert_eq!(scripts[4], dir.path().join("add_exac_fields.py"));
}

#[test]
fn missing_helper_script_is_reported() {
    let dir = TempDir::new().unwrap();
    for name in ["parse_clinvar_xml.py", "join_data.R", "dedup_clinvar.py"] {
        std::fs::write(dir.path().join(name), "").unwrap();
    }

    let err = check_scripts(&config(dir.path(), false)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Environment);
    assert!(err.to_string().contains("clinvar_table_to_vcf.py"), "got {err}");

    std::fs::write(dir.path().join("clinvar_table_to_vcf.py"), "").unwrap();
    check_scripts(&config(dir.path(), false)).unwrap();
}
