// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    absolute = { "/pub/clinvar/xml/a.xml.gz", "ftp://ftp.ncbi.nlm.nih.gov/pub/clinvar/xml/a.xml.gz" },
    relative = { "pub/clinvar/b.txt.gz",      "ftp://ftp.ncbi.nlm.nih.gov/pub/clinvar/b.txt.gz" },
)]
fn resource_url(path: &str, expected: &str) {
    let resource = RemoteResource::new("ftp.ncbi.nlm.nih.gov", path);
    assert_eq!(resource.url(), expected);
}

#[test]
fn resource_display_omits_scheme() {
    let resource = RemoteResource::new("example.org", "/a/b");
    assert_eq!(resource.to_string(), "example.org/a/b");
}

#[tokio::test]
async fn fake_remote_returns_registered_times_and_records_calls() {
    let remote = FakeRemote::new();
    let known = RemoteResource::new("host", "/known");
    remote.set_time(&known, 42);

    assert_eq!(remote.modified_time(&known).await.unwrap(), 42);
    let err = remote.modified_time(&RemoteResource::new("host", "/missing")).await.unwrap_err();
    assert!(matches!(err, RemoteError::Rejected { code: 550, .. }));

    assert_eq!(
        remote.calls(),
        vec![
            RemoteCall { host: "host".into(), path: "/known".into() },
            RemoteCall { host: "host".into(), path: "/missing".into() },
        ]
    );
}
