// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Direct launch: an ordinary child awaited with a synchronous wait.

use std::os::unix::process::ExitStatusExt;
use std::process::{Child, Command, ExitStatus};

use pstub_core::RawTermination;

use super::{LaunchError, LaunchRequest, LaunchedChild, WaitError};

/// Build the command for a request: target, optional single argument, exact environment.
pub(super) fn command(req: &LaunchRequest<'_>) -> Command {
    let mut cmd = Command::new(req.target);
    if !req.args.is_empty() {
        cmd.arg(req.args);
    }
    cmd.env_clear()
        .envs(req.env.vars().iter().map(|(k, v)| (k, v)));
    cmd
}

pub(super) fn launch(req: &LaunchRequest<'_>) -> Result<DirectChild, LaunchError> {
    let child = command(req)
        .spawn()
        .map_err(|source| LaunchError::Start { source })?;
    Ok(DirectChild { child })
}

/// Raw termination data from a wait status
pub fn raw_termination(status: ExitStatus) -> RawTermination {
    if let Some(code) = status.code() {
        RawTermination::exited(code)
    } else if let Some(signal) = status.signal() {
        RawTermination::signaled(signal)
    } else {
        RawTermination::exited(status.into_raw())
    }
}

/// Child owned by the stub
#[derive(Debug)]
pub struct DirectChild {
    child: Child,
}

impl LaunchedChild for DirectChild {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn wait_for_termination(mut self: Box<Self>) -> Result<RawTermination, WaitError> {
        let status = self.child.wait()?;
        tracing::debug!(pid = self.child.id(), ?status, "child ended");
        Ok(raw_termination(status))
    }
}

#[cfg(test)]
#[path = "direct_tests.rs"]
mod tests;
