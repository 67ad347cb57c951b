// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spec helpers: scratch projects and fluent assertions over `cv` runs.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Tools the driver looks for on `PATH`.
pub const TOOLS: &[&str] = &["bash", "wget", "python", "Rscript", "bgzip", "tabix", "vt"];

/// Helper scripts the driver expects in its scripts directory.
pub const SCRIPTS: &[&str] = &[
    "parse_clinvar_xml.py",
    "join_data.R",
    "dedup_clinvar.py",
    "clinvar_table_to_vcf.py",
    "add_exac_fields.py",
];

/// `cv` with no project directory.
pub fn cli() -> CvCommand {
    CvCommand::new(None)
}

pub struct CvCommand {
    cmd: assert_cmd::Command,
}

impl CvCommand {
    fn new(cwd: Option<&Path>) -> Self {
        let mut cmd = assert_cmd::Command::cargo_bin("cv").unwrap();
        cmd.env("NO_COLOR", "1").env_remove("CV_LOG").env_remove("CV_JOBS");
        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn output(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        RunOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run and require exit status 0.
    pub fn passes(self) -> RunOutput {
        let out = self.output();
        assert_eq!(out.code, Some(0), "expected success\n{out}");
        out
    }

    /// Run and require the given exit status.
    pub fn fails_with(self, code: i32) -> RunOutput {
        let out = self.output();
        assert_eq!(out.code, Some(code), "expected exit {code}\n{out}");
        out
    }
}

pub struct RunOutput {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl RunOutput {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout lacks {needle:?}\n{self}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr lacks {needle:?}\n{self}");
        self
    }
}

impl std::fmt::Display for RunOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exit: {:?}\n--- stdout\n{}\n--- stderr\n{}", self.code, self.stdout, self.stderr)
    }
}

/// Scratch directory laid out like a ClinVar build tree:
/// `ref/`, `data/`, `work/`, `out/` and a private `bin/` used as `PATH`.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let project = Self { dir: TempDir::new().unwrap() };
        for dir in ["ref", "data", "work", "out", "bin"] {
            std::fs::create_dir_all(project.path().join(dir)).unwrap();
        }
        project
    }

    /// Project with inputs, helper scripts and every tool stubbed out.
    pub fn complete() -> Self {
        let project = Self::new();
        project.file("ref/hg38.fa", ">chr1\nACGT\n");
        project.file("ref/exac.vcf.gz", "");
        project.file("ref/exac.vcf.gz.tbi", "");
        project.file("data/ClinVarFullRelease.xml.gz", "");
        project.file("data/variant_summary.txt.gz", "");
        for script in SCRIPTS {
            project.file(&format!("work/{script}"), "");
        }
        for tool in TOOLS {
            project.stub(tool, "exit 0");
        }
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Executable `bin/<name>` running `body` under `/bin/sh`.
    pub fn stub(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = self.file(&format!("bin/{name}"), &format!("#!/bin/sh\n{body}\n"));
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Replace `bin/<name>` with a link to the real program, if the host has it.
    pub fn link_host_tool(&self, name: &str) -> bool {
        let Some(real) = std::env::var_os("PATH")
            .iter()
            .flat_map(std::env::split_paths)
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
        else {
            return false;
        };
        let link = self.path().join("bin").join(name);
        let _ = std::fs::remove_file(&link);
        std::os::unix::fs::symlink(real, link).unwrap();
        true
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path().join(rel).exists()
    }

    /// `cv` run from the project root with `PATH` limited to `bin/`.
    pub fn cv(&self) -> CvCommand {
        CvCommand::new(Some(self.path())).env("PATH", self.path().join("bin"))
    }

    /// `cv` with every required flag pointing into the project.
    pub fn cv_with_inputs(&self) -> CvCommand {
        self.cv().args(&[
            "-R",
            "ref/hg38.fa",
            "-A",
            "GRCh38",
            "-X",
            "data/ClinVarFullRelease.xml.gz",
            "-S",
            "data/variant_summary.txt.gz",
            "--work-dir",
            "work",
            "--output-dir",
            "out",
        ])
    }
}
