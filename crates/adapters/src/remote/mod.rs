// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote modification-time lookups.

mod ftp;

pub use ftp::FtpMdtmClient;

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A file on a remote server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteResource {
    pub host: String,
    pub path: String,
}

impl RemoteResource {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self { host: host.into(), path: path.into() }
    }

    /// `ftp://host/path` URL for download tools.
    pub fn url(&self) -> String {
        format!("ftp://{}/{}", self.host, self.path.trim_start_matches('/'))
    }
}

impl fmt::Display for RemoteResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.path.trim_start_matches('/'))
    }
}

/// Errors from remote time queries
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("connection to {host} failed: {source}")]
    Connect { host: String, source: std::io::Error },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("server replied {code}: {message}")]
    Rejected { code: u16, message: String },

    #[error("unparsable modification time `{0}`")]
    InvalidTimestamp(String),
}

/// Adapter for reading a remote resource's last-modified time
#[async_trait]
pub trait RemoteMtime: Clone + Send + Sync + 'static {
    /// Modification time in POSIX seconds.
    async fn modified_time(&self, resource: &RemoteResource) -> Result<i64, RemoteError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{RemoteError, RemoteMtime, RemoteResource};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Recorded query
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RemoteCall {
        pub host: String,
        pub path: String,
    }

    #[derive(Default)]
    struct FakeRemoteState {
        times: HashMap<RemoteResource, i64>,
        calls: Vec<RemoteCall>,
    }

    /// Fake remote for testing. Unknown resources fail like a missing file.
    #[derive(Clone, Default)]
    pub struct FakeRemote {
        inner: Arc<Mutex<FakeRemoteState>>,
    }

    impl FakeRemote {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a modification time for a resource.
        pub fn set_time(&self, resource: &RemoteResource, secs: i64) {
            self.inner.lock().times.insert(resource.clone(), secs);
        }

        /// Get all recorded queries
        pub fn calls(&self) -> Vec<RemoteCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl RemoteMtime for FakeRemote {
        async fn modified_time(&self, resource: &RemoteResource) -> Result<i64, RemoteError> {
            let mut inner = self.inner.lock();
            inner.calls.push(RemoteCall { host: resource.host.clone(), path: resource.path.clone() });
            inner.times.get(resource).copied().ok_or_else(|| RemoteError::Rejected {
                code: 550,
                message: format!("{}: No such file or directory", resource.path),
            })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRemote, RemoteCall};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
