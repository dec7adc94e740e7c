// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session launch: the target's end is announced through a notification
//! queue instead of being awaited directly.
//!
//! The session starts in the foreground. The target stays in the stub's
//! process group, so on a console it owns the terminal's input and output.
//! The session monitor thread plays the part of the session manager and is
//! the only writer of the queue; the stub only ever reads it.

use std::ffi::OsStr;
use std::io;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, SendError};

use pstub_core::{ChildEnvironment, RawTermination};

use super::queue::{element_result, pack_element, NotificationQueue, QueuePoster};
use super::{LaunchError, LaunchRequest, LaunchedChild, WaitError};

/// Start descriptor for a new session
#[derive(Debug)]
pub struct SessionStart<'a> {
    pub program: &'a Path,
    pub inputs: &'a OsStr,
    pub env: &'a ChildEnvironment,
    /// Stays in the stub's process group and owns the console's input.
    /// A background session leads its own group with input detached.
    pub foreground: bool,
    /// Writes to the console
    pub visible: bool,
    pub term_queue: &'a Path,
}

impl SessionStart<'_> {
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.program);
        if !self.inputs.is_empty() {
            cmd.arg(self.inputs);
        }
        cmd.env_clear()
            .envs(self.env.vars().iter().map(|(k, v)| (k, v)));
        if !self.foreground {
            cmd.process_group(0).stdin(Stdio::null());
        }
        if !self.visible {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        cmd
    }
}

/// Result code the session manager posts: exit code, or 128 + signal
pub fn session_result_code(status: ExitStatus) -> u16 {
    let code = status
        .code()
        .or_else(|| status.signal().map(|s| 128 + s))
        .unwrap_or(0);
    code as u16
}

pub(super) fn launch(
    req: &LaunchRequest<'_>,
    queue_dir: &Path,
) -> Result<SessionChild, LaunchError> {
    let owner_pid = std::process::id();
    let (queue, poster) = NotificationQueue::create(queue_dir, owner_pid).map_err(|source| {
        LaunchError::QueueCreate {
            queue: NotificationQueue::name_for(queue_dir, owner_pid),
            source,
        }
    })?;

    // The monitor exists before the target does; `queue` is dropped (and
    // removed) on every early return below.
    let (sessions, started) = mpsc::channel();
    std::thread::Builder::new()
        .name("session-monitor".to_string())
        .spawn(move || monitor(started, poster))
        .map_err(|source| LaunchError::Start { source })?;

    let start = SessionStart {
        program: req.target,
        inputs: req.args,
        env: req.env,
        foreground: true,
        visible: true,
        term_queue: queue.path(),
    };
    let child = start
        .command()
        .spawn()
        .map_err(|source| LaunchError::Start { source })?;
    let pid = child.id();

    if let Err(SendError(mut child)) = sessions.send(child) {
        tracing::error!(pid, "session monitor gone, stopping target");
        let _ = child.kill();
        let _ = child.wait();
        return Err(LaunchError::Start {
            source: io::Error::other("session monitor stopped"),
        });
    }

    Ok(SessionChild { pid, queue })
}

/// Wait for the session's target and post its result.
///
/// Without a target, or when the wait fails, the poster is dropped unused
/// and the reader sees end-of-file.
fn monitor(started: Receiver<Child>, poster: QueuePoster) {
    let Ok(mut child) = started.recv() else {
        return;
    };
    let session_id = child.id();
    match child.wait() {
        Ok(status) => {
            tracing::debug!(pid = session_id, ?status, "session ended");
            let element = pack_element(session_result_code(status), session_id);
            if let Err(e) = poster.post(element) {
                tracing::error!(pid = session_id, error = %e, "failed to post termination");
            }
        }
        Err(e) => {
            tracing::error!(pid = session_id, error = %e, "lost track of session");
        }
    }
}

/// Target started in its own session
#[derive(Debug)]
pub struct SessionChild {
    pid: u32,
    queue: NotificationQueue,
}

impl LaunchedChild for SessionChild {
    fn id(&self) -> u32 {
        self.pid
    }

    /// The queue only carries a result code, so the cause is always a plain exit.
    fn wait_for_termination(self: Box<Self>) -> Result<RawTermination, WaitError> {
        let element = self.queue.read_element()?;
        drop(self.queue);
        Ok(RawTermination::exited(i32::from(element_result(element))))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
