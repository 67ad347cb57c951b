// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote freshness checks against local copies.

use std::path::Path;
use std::time::UNIX_EPOCH;

use cv_adapters::{RemoteMtime, RemoteResource};
use cv_core::{format_epoch, Freshness, RemoteTime};
use tracing::{debug, info, warn};

use crate::staleness::modified;

/// Decides whether a remote resource is newer than its local copy.
///
/// Network trouble degrades to "no refresh": the caller keeps working with
/// the local copy it already has.
#[derive(Clone)]
pub struct FreshnessChecker<R: RemoteMtime> {
    remote: R,
}

impl<R: RemoteMtime> FreshnessChecker<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    pub async fn check(&self, resource: &RemoteResource, local: &Path) -> Freshness {
        info!(%resource, "retrieving last-changed time");
        let remote = match self.remote.modified_time(resource).await {
            Ok(secs) => {
                debug!(%resource, modified = %format_epoch(secs), "remote time");
                RemoteTime::Known(secs)
            }
            Err(e) => {
                warn!(%resource, error = %e, "could not retrieve last-changed time, keeping local copy");
                RemoteTime::Unavailable(e.to_string())
            }
        };

        let freshness = Freshness::evaluate(&remote, local_secs(local));
        info!(
            %resource,
            local = %local.display(),
            needs_refresh = freshness.needs_refresh,
            "freshness checked"
        );
        freshness
    }
}

/// Local modification time in whole seconds; `None` when the file is absent
/// or unreadable.
fn local_secs(path: &Path) -> Option<i64> {
    match modified(path) {
        Ok(Some(mtime)) => {
            Some(mtime.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs() as i64))
        }
        Ok(None) => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot stat local copy, treating as absent");
            None
        }
    }
}

#[cfg(test)]
#[path = "freshness_tests.rs"]
mod tests;
