// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn with_var<T>(name: &str, value: Option<&str>, read: impl FnOnce() -> T) -> T {
    match value {
        Some(v) => std::env::set_var(name, v),
        None => std::env::remove_var(name),
    }
    let result = read();
    std::env::remove_var(name);
    result
}

#[test]
#[serial]
fn ftp_timeout_from_env() {
    let cases = [
        (None, Duration::from_secs(3)),
        (Some("250"), Duration::from_millis(250)),
        (Some("soon"), Duration::from_secs(3)),
    ];
    for (value, expected) in cases {
        assert_eq!(with_var("CV_FTP_TIMEOUT_MS", value, ftp_timeout), expected, "{value:?}");
    }
}

#[test]
#[serial]
fn ftp_host_defaults_to_ncbi() {
    assert_eq!(with_var("CV_FTP_HOST", None, ftp_host), "ftp.ncbi.nlm.nih.gov");
    assert_eq!(with_var("CV_FTP_HOST", Some(""), ftp_host), "ftp.ncbi.nlm.nih.gov");
    assert_eq!(with_var("CV_FTP_HOST", Some("mirror.example.org"), ftp_host), "mirror.example.org");
}

#[test]
#[serial]
fn jobs_from_env() {
    let cases = [(None, None), (Some("4"), Some(4)), (Some("0"), None), (Some("lots"), None)];
    for (value, expected) in cases {
        assert_eq!(with_var("CV_JOBS", value, jobs), expected, "{value:?}");
    }
}

#[test]
#[serial]
fn empty_log_filter_is_ignored() {
    assert_eq!(with_var("CV_LOG", Some(""), log_filter), None);
    assert_eq!(with_var("CV_LOG", Some("debug"), log_filter).as_deref(), Some("debug"));
}
