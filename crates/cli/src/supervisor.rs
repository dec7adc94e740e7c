// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor: one invocation, one child.
//!
//! ```text
//! chdir -> query app type -> library path -> sanitize env
//!       -> launch (direct | session) -> pid -> wait -> classify -> report
//! ```
//!
//! Every failure ends the run immediately. Failures after the channel is up
//! go to the controller as `err:<phase>` where the protocol allows it, and
//! always to stderr.

use std::fmt::Display;
use std::io::Write;

use pstub_adapters::{LaunchRequest, LaunchStrategy, LaunchedChild, ProcessHost, StatusChannel};
use pstub_core::{
    classify, os_code, ChildEnvironment, DirectiveSet, Invocation, Message, Outcome, Phase,
    StubExit,
};
use tracing::{debug, error, info, warn};

pub struct Supervisor<H, C, W> {
    host: H,
    channel: C,
    stderr: W,
}

impl<H, C, W> Supervisor<H, C, W>
where
    H: ProcessHost,
    C: StatusChannel,
    W: Write,
{
    pub fn new(host: H, channel: C, stderr: W) -> Self {
        Self {
            host,
            channel,
            stderr,
        }
    }

    /// Supervise the target described by `inv` and report its outcome.
    pub fn run(&mut self, inv: &Invocation) -> StubExit {
        match self.supervise(inv) {
            Ok(outcome) => {
                info!(?outcome, "target finished");
                StubExit::Completed
            }
            Err(exit) => exit,
        }
    }

    pub fn into_parts(self) -> (H, C, W) {
        (self.host, self.channel, self.stderr)
    }

    fn supervise(&mut self, inv: &Invocation) -> Result<Outcome, StubExit> {
        if let Err(e) = self.host.change_dir(inv.workdir()) {
            warn!(dir = %inv.workdir().display(), error = %e, "cannot enter working directory");
            self.diag(format_args!(
                "Cannot change to working directory {}: {}",
                inv.workdir().display(),
                e
            ));
            self.report(Message::Error {
                phase: Phase::Chdir,
                code: os_code(&e),
            })?;
            return Err(StubExit::Invocation);
        }

        let app_type = match self.host.query_app_type(inv.target()) {
            Ok(app_type) => app_type,
            Err(e) => {
                error!(exe = %inv.target().display(), error = %e, "unknown application type");
                self.diag("Unable to determine application type");
                self.report(Message::Error {
                    phase: Phase::Exec,
                    code: os_code(&e),
                })?;
                return Err(StubExit::Internal);
            }
        };

        let env = self.prepare_environment();

        let strategy = app_type.strategy();
        info!(
            action = %inv.action(),
            ?app_type,
            ?strategy,
            exe = %inv.target().display(),
            "launching"
        );
        let req = LaunchRequest {
            target: inv.target(),
            args: inv.target_args(),
            env: &env,
        };
        let launched = match strategy {
            LaunchStrategy::Direct => self.host.launch_direct(&req),
            LaunchStrategy::Session => self.host.launch_session(&req),
        };
        let child = match launched {
            Ok(child) => child,
            Err(e) if e.reported_to_controller() => {
                error!(error = %e, "launch failed");
                let what = match strategy {
                    LaunchStrategy::Direct => "process",
                    LaunchStrategy::Session => "session",
                };
                self.diag(format_args!("Cannot start child {} due to {}", what, e));
                self.report(Message::Error {
                    phase: Phase::Exec,
                    code: e.os_code(),
                })?;
                return Err(StubExit::Internal);
            }
            Err(e) => {
                error!(error = %e, "launch setup failed");
                self.diag(&e);
                return Err(StubExit::Internal);
            }
        };

        self.await_outcome(child)
    }

    /// Apply library-path directives once, then strip them from the child's block.
    fn prepare_environment(&mut self) -> ChildEnvironment {
        let snapshot = self.host.environment();
        let directives =
            DirectiveSet::from_vars(snapshot.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str())));
        for (directive, value) in directives.iter() {
            match self.host.extend_library_path(directive, value) {
                Ok(()) => debug!(?directive, ?value, "library path extended"),
                Err(e) => debug!(?directive, error = %e, "library path directive ignored"),
            }
        }

        let env = ChildEnvironment::sanitize(self.host.environment());
        debug!(vars = env.len(), "child environment prepared");
        env
    }

    fn await_outcome(&mut self, child: Box<dyn LaunchedChild>) -> Result<Outcome, StubExit> {
        let pid = child.id();
        info!(pid, "target started");
        self.report(Message::Pid(pid))?;

        let raw = match child.wait_for_termination() {
            Ok(raw) => raw,
            Err(e) => {
                error!(pid, error = %e, "wait failed");
                self.diag(format_args!("Cannot obtain return codes from child {}", e));
                return Err(StubExit::Internal);
            }
        };

        let outcome = classify(raw);
        debug!(?raw, ?outcome, "termination classified");
        self.report(Message::from(outcome))?;
        Ok(outcome)
    }

    fn report(&mut self, msg: Message) -> Result<(), StubExit> {
        self.channel.send(msg).map_err(|e| {
            error!(error = %e, line = %msg, "channel write failed");
            self.diag(&e);
            StubExit::Internal
        })
    }

    fn diag(&mut self, msg: impl Display) {
        let _ = writeln!(self.stderr, "{}", msg);
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
