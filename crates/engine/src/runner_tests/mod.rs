// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::staleness::StaleReason;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

mod parallel;
mod sequential;

/// Runner rooted in a fresh temp dir, using plain `sh` without pipefail.
struct Harness {
    dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn config(&self) -> RunnerConfig {
        RunnerConfig::new(self.path()).shell("sh").pipefail(false)
    }

    fn runner(&self) -> JobRunner {
        JobRunner::new(self.config())
    }

    /// Create `name` with an mtime `age` seconds in the past.
    fn touch_aged(&self, name: &str, age: u64) {
        let path = self.path().join(name);
        std::fs::write(&path, name).unwrap();
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(age)).unwrap();
    }

    /// Push a file's mtime `ahead` seconds into the future.
    fn bump(&self, name: &str, ahead: u64) {
        let file = std::fs::File::options().write(true).open(self.path().join(name)).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(ahead)).unwrap();
    }

    fn exists(&self, name: &str) -> bool {
        self.path().join(name).exists()
    }

    /// Lines appended to `runs.log` by test commands.
    fn runs(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join("runs.log"))
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

fn job(name: &str, steps: &[&str]) -> Job {
    let mut job = Job::new(name);
    for text in steps {
        job.push_parsed(text).unwrap();
    }
    job
}
