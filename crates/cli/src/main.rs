// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pstub - process launch stub
//!
//! Started by a controller to run one program outside the controller's own
//! process tree. Reports `pid`, then `exit`/`crash` (or `err:<phase>`) over
//! the controller's Unix socket, then waits for the user before exiting.
//!
//! Exit codes: 0 = protocol completed, 1 = invocation error, 3 = internal error.

use std::process::ExitCode;

use pstub::{env, logging, pause_for_acknowledgment, Supervisor};
use pstub_adapters::{SystemHost, UnixChannel};
use pstub_core::{Invocation, StubExit, USAGE};
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let invocation = match Invocation::from_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("This is an internal helper. Do not run it manually.");
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            return StubExit::Invocation.into();
        }
    };

    let _log_guard = env::log_file().and_then(|path| match logging::setup_logging(&path) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("pstub: logging disabled: {e}");
            None
        }
    });

    info!(
        pid = std::process::id(),
        action = %invocation.action(),
        exe = %invocation.target().display(),
        "stub starting"
    );

    let exit = supervise(&invocation);
    info!(code = exit.code(), "stub halting");

    let stdin = std::io::stdin();
    if let Err(e) = pause_for_acknowledgment(
        invocation.continuation(),
        stdin.lock(),
        std::io::stdout().lock(),
    ) {
        debug!(error = %e, "pause interrupted");
    }
    exit.into()
}

/// Connect to the controller and run the supervisor; the channel is closed on return.
fn supervise(invocation: &Invocation) -> StubExit {
    let channel = match UnixChannel::connect(invocation.channel()) {
        Ok(channel) => channel,
        Err(e) => {
            error!(error = %e, "controller unreachable");
            eprintln!("{e}");
            return StubExit::Invocation;
        }
    };

    let host = SystemHost::new(env::queue_dir());
    let mut supervisor = Supervisor::new(host, channel, std::io::stderr());
    supervisor.run(invocation)
}
