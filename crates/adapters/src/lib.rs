// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the controller channel and the OS process host

pub mod channel;
pub mod host;

pub use channel::{ChannelError, StatusChannel, UnixChannel};
pub use host::{
    AppType, LaunchError, LaunchRequest, LaunchStrategy, LaunchedChild, ProcessHost, SystemHost,
    WaitError,
};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use channel::FakeChannel;
#[cfg(any(test, feature = "test-support"))]
pub use host::{FakeChild, FakeHost, HostCall};
