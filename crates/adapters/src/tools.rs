// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating external executables on a search path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Looks up programs the way a shell resolves bare command names.
#[derive(Debug, Clone)]
pub struct ToolLocator {
    search_path: OsString,
}

impl ToolLocator {
    /// Locator over the current process `PATH`.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("PATH").unwrap_or_default())
    }

    pub fn new(search_path: impl Into<OsString>) -> Self {
        Self { search_path: search_path.into() }
    }

    /// Resolve a program name to an executable file.
    ///
    /// Names containing a path separator are checked as-is.
    pub fn find(&self, program: &str) -> Option<PathBuf> {
        if program.contains(std::path::MAIN_SEPARATOR) {
            let path = PathBuf::from(program);
            return is_executable(&path).then_some(path);
        }
        std::env::split_paths(&self.search_path)
            .map(|dir| dir.join(program))
            .find(|candidate| is_executable(candidate))
    }

    /// Programs from `required` that cannot be found, in the given order.
    pub fn missing<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        required
            .into_iter()
            .filter(|program| self.find(program).is_none())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "tools_tests.rs"]
mod tests;
