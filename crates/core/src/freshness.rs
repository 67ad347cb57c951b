// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote-vs-local freshness decisions.
//!
//! Times are whole POSIX seconds. A failed remote query is never an error
//! here: it resolves to "no refresh" with a remote time of `0` so the caller
//! keeps using whatever local copy it already has.

/// What the remote side told us about a resource's modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteTime {
    Known(i64),
    /// The query failed; the reason is kept for diagnostics.
    Unavailable(String),
}

/// Whether the remote query itself succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Resolved,
    Failed(String),
}

impl QueryOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, QueryOutcome::Failed(_))
    }
}

/// Result of comparing a remote resource against its local copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Freshness {
    pub needs_refresh: bool,
    /// Remote modification time, or `0` when unknown.
    pub remote_time: i64,
    pub query: QueryOutcome,
}

impl Freshness {
    /// Decide whether the local copy (mtime in seconds, `None` if absent)
    /// must be refreshed from the remote resource.
    pub fn evaluate(remote: &RemoteTime, local_mtime: Option<i64>) -> Self {
        match remote {
            RemoteTime::Unavailable(reason) => Self {
                needs_refresh: false,
                remote_time: 0,
                query: QueryOutcome::Failed(reason.clone()),
            },
            RemoteTime::Known(remote_time) => Self {
                needs_refresh: match local_mtime {
                    None => true,
                    Some(local) => *remote_time > local,
                },
                remote_time: *remote_time,
                query: QueryOutcome::Resolved,
            },
        }
    }
}

#[cfg(test)]
#[path = "freshness_tests.rs"]
mod tests;
