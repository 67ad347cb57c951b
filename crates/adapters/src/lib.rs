// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cv-adapters: boundaries to the outside world (remote servers, the host PATH)

pub mod remote;
pub mod tools;

pub use remote::{FtpMdtmClient, RemoteError, RemoteMtime, RemoteResource};
#[cfg(any(test, feature = "test-support"))]
pub use remote::{FakeRemote, RemoteCall};
pub use tools::ToolLocator;
