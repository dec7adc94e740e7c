// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process host: the OS calls the stub makes on behalf of the target.
//!
//! Two launch strategies exist. Both hand back a [`LaunchedChild`], so the
//! supervisor waits the same way whichever one was used.

mod apptype;
mod direct;
mod libpath;
mod queue;
mod session;
mod system;

pub use apptype::{classify_header, query_app_type, AppType, LaunchStrategy};
pub use queue::NotificationQueue;
pub use system::SystemHost;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeChild, FakeHost, HostCall};

use pstub_core::{os_code, ChildEnvironment, Directive, RawTermination};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from starting the target
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The session's notification queue could not be created
    #[error("Cannot create {}: {source}", .queue.display())]
    QueueCreate {
        queue: PathBuf,
        source: std::io::Error,
    },
    /// The OS refused to start the target
    #[error("{source}")]
    Start { source: std::io::Error },
}

impl LaunchError {
    /// Start failures go to the controller; queue failures only to stderr
    pub fn reported_to_controller(&self) -> bool {
        matches!(self, LaunchError::Start { .. })
    }

    pub fn os_code(&self) -> i32 {
        match self {
            LaunchError::QueueCreate { source, .. } | LaunchError::Start { source } => {
                os_code(source)
            }
        }
    }
}

/// Errors while waiting for the target to end
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// What to start and with which environment
#[derive(Debug, Clone, Copy)]
pub struct LaunchRequest<'a> {
    pub target: &'a Path,
    /// Passed verbatim as a single argument; omitted when empty
    pub args: &'a OsStr,
    pub env: &'a ChildEnvironment,
}

/// A started target whose termination can be awaited once
pub trait LaunchedChild {
    /// Process identifier reported to the controller
    fn id(&self) -> u32;

    /// Block until the target ends.
    fn wait_for_termination(self: Box<Self>) -> Result<RawTermination, WaitError>;
}

/// OS operations used by the supervisor
pub trait ProcessHost {
    /// Change the stub's working directory (inherited by the target).
    fn change_dir(&mut self, dir: &Path) -> std::io::Result<()>;

    /// Determine the target's binary characteristics.
    fn query_app_type(&mut self, target: &Path) -> std::io::Result<AppType>;

    /// Snapshot of the stub's current environment
    fn environment(&mut self) -> Vec<(OsString, OsString)>;

    /// Apply one library-path directive to the stub process.
    fn extend_library_path(&mut self, directive: Directive, value: &OsStr) -> std::io::Result<()>;

    /// Start the target as an ordinary child of the stub.
    fn launch_direct(
        &mut self,
        req: &LaunchRequest<'_>,
    ) -> Result<Box<dyn LaunchedChild>, LaunchError>;

    /// Start the target in a new session bound to a notification queue.
    fn launch_session(
        &mut self,
        req: &LaunchRequest<'_>,
    ) -> Result<Box<dyn LaunchedChild>, LaunchError>;
}
