// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the driver.

use std::time::Duration;

/// NCBI FTP server hosting the ClinVar releases.
pub const DEFAULT_FTP_HOST: &str = "ftp.ncbi.nlm.nih.gov";

/// Tracing filter directive (`CV_LOG`), e.g. `debug` or `cv_engine=trace`.
pub fn log_filter() -> Option<String> {
    std::env::var("CV_LOG").ok().filter(|s| !s.is_empty())
}

/// FTP host for release checks (`CV_FTP_HOST`, for mirrors).
pub fn ftp_host() -> String {
    std::env::var("CV_FTP_HOST")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_FTP_HOST.to_string())
}

/// Timeout for one freshness query (default 3s, `CV_FTP_TIMEOUT_MS`).
pub fn ftp_timeout() -> Duration {
    std::env::var("CV_FTP_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(3))
}

/// Default download parallelism (`CV_JOBS`), below `--jobs` and the config file.
pub fn jobs() -> Option<usize> {
    std::env::var("CV_JOBS").ok().and_then(|s| s.parse::<usize>().ok()).filter(|n| *n > 0)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
